mod migrate;
mod time;

pub use migrate::ensure_from_older_version;
pub use time::{day_index, Duration, Expiration, SECONDS_PER_DAY};
