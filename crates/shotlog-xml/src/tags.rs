//! Element and attribute names of the session grammar.

pub(crate) const TAG_SESSION: &str = "session";
pub(crate) const TAG_CAMERA: &str = "camera";
pub(crate) const TAG_SHOT: &str = "shot";
pub(crate) const TAG_TARGET_ADDED: &str = "targetAdded";
pub(crate) const TAG_TARGET_REMOVED: &str = "targetRemoved";
pub(crate) const TAG_TARGET_RESIZED: &str = "targetResized";
pub(crate) const TAG_TARGET_MOVED: &str = "targetMoved";
pub(crate) const TAG_FEED_MESSAGE: &str = "exerciseFeedMessage";

pub(crate) const ATTR_NAME: &str = "name";
pub(crate) const ATTR_TIMESTAMP: &str = "timestamp";
pub(crate) const ATTR_COLOR: &str = "color";
pub(crate) const ATTR_X: &str = "x";
pub(crate) const ATTR_Y: &str = "y";
pub(crate) const ATTR_SHOT_TIMESTAMP: &str = "shotTimestamp";
pub(crate) const ATTR_MARKER_RADIUS: &str = "markerRadius";
pub(crate) const ATTR_IS_MALFUNCTION: &str = "isMalfunction";
pub(crate) const ATTR_IS_RELOAD: &str = "isReload";
pub(crate) const ATTR_TARGET_INDEX: &str = "targetIndex";
pub(crate) const ATTR_HIT_REGION_INDEX: &str = "hitRegionIndex";
pub(crate) const ATTR_VIDEOS: &str = "videos";
pub(crate) const ATTR_INDEX: &str = "index";
pub(crate) const ATTR_NEW_WIDTH: &str = "newWidth";
pub(crate) const ATTR_NEW_HEIGHT: &str = "newHeight";
pub(crate) const ATTR_NEW_X: &str = "newX";
pub(crate) const ATTR_NEW_Y: &str = "newY";
