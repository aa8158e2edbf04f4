pub const API_BASE_URL: &str = "https://www.coresky.com";
pub const LOGIN_ENDPOINT: &str = "/api/user/login";
pub const SIGN_IN_ENDPOINT: &str = "/api/taskwall/meme/sign";
pub const SCORE_ENDPOINT: &str = "/api/user/score/detail";

pub const TOKEN_HEADER: &str = "token";
pub const REF_CODE: &str = "aeepcd";
pub const PROJECT_ID: &str = "0";

// The remote side validates the signed payload against this exact text,
// blank lines included. Do not reformat.
pub const AUTH_MESSAGE_TEMPLATE: &str = "Welcome to CoreSky!\n\nClick to sign in and accept the CoreSky Terms of Service.\n\nThis request will not trigger a blockchain transaction or cost any gas fees.\n\nWallet address:\n{address}";

// FILES
pub const PRIVATE_KEYS_FILE_PATH: &str = "data/pk.txt";
pub const PROXIES_FILE_PATH: &str = "data/proxy.txt";

pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MAX_RETRIES: u32 = 3;
