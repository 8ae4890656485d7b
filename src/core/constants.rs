pub const USER_CREATED: &str = "USER_CREATED";
pub const USER_UPDATED: &str = "USER_UPDATED";
pub const USER_DELETED: &str = "USER_DELETED";

pub const MAX_FIELD_LENGTH: usize = 255;
