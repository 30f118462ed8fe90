//! Built-in drill library used when no catalog file is configured.

use crate::types::{Drill, DrillId, Equipment};

#[allow(clippy::too_many_arguments)]
fn drill(
    id: DrillId,
    title: &str,
    family: &str,
    skill: &str,
    level: u8,
    equipment: Equipment,
    instructions: &str,
    video: &str,
    why: &str,
) -> Drill {
    Drill {
        id,
        title: title.to_string(),
        family: family.to_string(),
        skill: skill.to_string(),
        level,
        equipment,
        instructions: instructions.to_string(),
        video_url: Some(video.to_string()),
        why_it_matters: Some(why.to_string()),
    }
}

/// The default 18-drill library, in presentation order.
#[rustfmt::skip]
pub fn default_drills() -> Vec<Drill> {
    use Equipment::{BallCones, BallOnly};

    const TOE_TAPS_WHY: &str = "Improves rhythm and close control.";
    const IO_WHY: &str = "Teaches ball manipulation with both sides of the foot.";
    const FIG8_WHY: &str = "Teaches control in tight turns.";
    const JUGGLE_WHY: &str = "Develops touch, balance, and concentration.";

    vec![
        drill(1, "Toe Taps", "Toe Taps", "ball_control", 1, BallOnly,
            "Stand over the ball. Alternate feet tapping the top. Goal: 20 in 30s.",
            "https://www.youtube.com/watch?v=dummy1", TOE_TAPS_WHY),
        drill(2, "Toe Taps", "Toe Taps", "ball_control", 2, BallOnly,
            "Alternate taps with both feet. Goal: 30 in 30s.",
            "https://www.youtube.com/watch?v=dummy1", TOE_TAPS_WHY),
        drill(3, "Toe Taps", "Toe Taps", "ball_control", 3, BallOnly,
            "Increase speed. Goal: 40 in 30s with head up.",
            "https://www.youtube.com/watch?v=dummy1", TOE_TAPS_WHY),
        drill(4, "Inside–Outside Touches", "Inside-Outside Touches", "ball_control", 1, BallOnly,
            "Alternate inside/outside touches with each foot. 20 cycles.",
            "https://www.youtube.com/watch?v=dummy2", IO_WHY),
        drill(5, "Inside–Outside Touches", "Inside-Outside Touches", "ball_control", 2, BallOnly,
            "30 cycles at faster pace.",
            "https://www.youtube.com/watch?v=dummy2", IO_WHY),
        drill(6, "Inside–Outside Touches", "Inside-Outside Touches", "ball_control", 3, BallOnly,
            "40 cycles with head up.",
            "https://www.youtube.com/watch?v=dummy2", IO_WHY),
        drill(7, "Figure-8 Dribble", "Figure-8 Dribble", "dribbling", 1, BallOnly,
            "Dribble in a figure-8 around two objects (use shoes). 3 laps.",
            "https://www.youtube.com/watch?v=dummy6", FIG8_WHY),
        drill(8, "Figure-8 Dribble", "Figure-8 Dribble", "dribbling", 2, BallOnly,
            "Figure-8 faster. 4 laps.",
            "https://www.youtube.com/watch?v=dummy6", FIG8_WHY),
        drill(9, "Figure-8 Dribble", "Figure-8 Dribble", "dribbling", 3, BallOnly,
            "Figure-8 with head up. 5 laps.",
            "https://www.youtube.com/watch?v=dummy6", FIG8_WHY),
        drill(10, "Wall Passes", "Wall Passes", "passing", 1, BallOnly,
            "20 passes with right foot against a wall.",
            "https://www.youtube.com/watch?v=dummy7",
            "Builds accuracy and confidence with stronger foot."),
        drill(11, "Wall Passes", "Wall Passes", "passing", 2, BallOnly,
            "20 passes with left foot.",
            "https://www.youtube.com/watch?v=dummy7",
            "Develops weaker foot accuracy."),
        drill(12, "Wall Passes", "Wall Passes", "passing", 3, BallOnly,
            "40 alternating-foot passes.",
            "https://www.youtube.com/watch?v=dummy7",
            "Builds accuracy and two-footed passing."),
        drill(13, "Cone Slalom", "Cone Slalom", "dribbling", 1, BallCones,
            "5 cones 1m apart. Slalom down and back once.",
            "https://www.youtube.com/watch?v=dummy11",
            "Builds close control and agility."),
        drill(14, "Cone Slalom", "Cone Slalom", "dribbling", 2, BallCones,
            "Slalom down and back twice in 30s.",
            "https://www.youtube.com/watch?v=dummy11",
            "Builds close control and agility."),
        drill(15, "Cone Slalom", "Cone Slalom", "dribbling", 3, BallCones,
            "Slalom down/back with weak foot only, twice.",
            "https://www.youtube.com/watch?v=dummy11",
            "Builds weak foot and tight dribbling."),
        drill(16, "Juggling Practice", "Juggling Practice", "ball_control", 1, BallOnly,
            "Keep the ball up using feet only. Goal: 5 touches.",
            "https://www.youtube.com/watch?v=dummy3", JUGGLE_WHY),
        drill(17, "Juggling Practice", "Juggling Practice", "ball_control", 2, BallOnly,
            "Keep the ball up using feet only. Goal: 10 touches.",
            "https://www.youtube.com/watch?v=dummy3", JUGGLE_WHY),
        drill(18, "Step Over Practice", "Step Over Practice", "dribbling", 1, BallOnly,
            "Step over the ball with each foot. 10 each side.",
            "https://www.youtube.com/watch?v=dummy8",
            "Learns basic deception and body movement."),
    ]
}
