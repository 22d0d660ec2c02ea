use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of generated entity IDs.
pub const ID_LENGTH: usize = 16;

/// Length of generated access tokens (`adminUrl` etc.).
pub const TOKEN_LENGTH: usize = 12;

/// Generate a random unique entity ID.
pub fn new_id() -> String {
    random_string(ID_LENGTH)
}

/// Generate a random opaque access token for one group use-mode.
pub fn new_access_token() -> String {
    random_string(TOKEN_LENGTH)
}

fn random_string(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
