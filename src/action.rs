use std::fmt;

use crate::pose::PoseLabel;

/// The fixed set of recognized hand actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionLabel {
    Grab,
    Wave,
    Point,
    ThumbsUp,
    PeaceSign,
    OkGesture,
    FistBump,
    ThumbDown,
    CustomAction,
    Unknown,
}

impl ActionLabel {
    pub fn name(&self) -> &'static str {
        match self {
            ActionLabel::Grab => "Grab",
            ActionLabel::Wave => "Wave",
            ActionLabel::Point => "Point",
            ActionLabel::ThumbsUp => "Thumbs-Up",
            ActionLabel::PeaceSign => "Peace Sign",
            ActionLabel::OkGesture => "OK Gesture",
            ActionLabel::FistBump => "Fist Bump",
            ActionLabel::ThumbDown => "Thumb Down",
            ActionLabel::CustomAction => "Custom Action",
            ActionLabel::Unknown => "Unknown Action",
        }
    }
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Lookup walks the table in declaration order and the first entry whose
// qualifying set contains the pose name wins, so "Closed Fist" always
// resolves to Grab and the Thumbs-Up, Fist Bump and Thumb Down entries are
// shadowed. Wave, Thumb Down and Custom Action additionally name poses the
// classifier never produces.
const ACTION_TABLE: [(ActionLabel, &[&str]); 9] = [
    (ActionLabel::Grab, &["Closed Fist"]),
    (ActionLabel::Wave, &["Open Hand"]),
    (ActionLabel::Point, &["One Finger"]),
    (ActionLabel::ThumbsUp, &["One Finger", "Closed Fist"]),
    (ActionLabel::PeaceSign, &["Two Fingers"]),
    (ActionLabel::OkGesture, &["Three Fingers"]),
    (ActionLabel::FistBump, &["Closed Fist", "Closed Fist"]),
    (ActionLabel::ThumbDown, &["Thumb", "Closed Fist"]),
    (ActionLabel::CustomAction, &["Specific Hand Gesture"]),
];

/// Maps a pose label to its action.
pub fn recognize_action(pose: PoseLabel) -> ActionLabel {
    recognize_action_name(pose.name())
}

/// Name-based lookup into the action table. First match in declaration
/// order wins; unmatched names map to `Unknown`.
pub fn recognize_action_name(pose_name: &str) -> ActionLabel {
    for (action, poses) in ACTION_TABLE {
        if poses.contains(&pose_name) {
            return action;
        }
    }
    ActionLabel::Unknown
}
