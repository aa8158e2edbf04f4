use std::path::Path;

use tokio::io::AsyncBufReadExt;
use tracing::{error, warn};

use crate::constants::{PRIVATE_KEYS_FILE_PATH, PROXIES_FILE_PATH};

#[derive(Debug, Clone)]
pub struct AccountCredential {
    pub private_key: String,
    pub proxy: String,
}

pub async fn read_file_lines(path: impl AsRef<Path>) -> eyre::Result<Vec<String>> {
    let file = tokio::fs::read(path).await?;
    let mut lines = file.lines();

    let mut contents = vec![];
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if !line.is_empty() {
            contents.push(line.to_owned());
        }
    }

    Ok(contents)
}

async fn read_lines_or_empty(path: impl AsRef<Path>) -> Vec<String> {
    let path = path.as_ref();
    match read_file_lines(path).await {
        Ok(lines) => lines,
        Err(err) => {
            error!("Failed to read {}: {err}", path.display());
            Vec::new()
        }
    }
}

pub async fn load_credentials() -> Vec<AccountCredential> {
    load_credentials_from(PRIVATE_KEYS_FILE_PATH, PROXIES_FILE_PATH).await
}

// Line i of each file forms one account pair; the longer list is
// truncated to the shorter one.
async fn load_credentials_from(
    keys_path: impl AsRef<Path>,
    proxies_path: impl AsRef<Path>,
) -> Vec<AccountCredential> {
    let keys = read_lines_or_empty(keys_path).await;
    let proxies = read_lines_or_empty(proxies_path).await;

    if keys.len() != proxies.len() {
        warn!(
            "Key/proxy count mismatch: {} key(s), {} proxy(ies). Processing the first {} pair(s)",
            keys.len(),
            proxies.len(),
            keys.len().min(proxies.len())
        );
    }

    keys.into_iter()
        .zip(proxies)
        .map(|(private_key, proxy)| AccountCredential { private_key, proxy })
        .collect()
}

pub fn mask_key(key: &str) -> String {
    if key.len() <= 10 || !key.is_ascii() {
        return "***".to_owned();
    }

    format!("{}...{}", &key[..6], &key[key.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        tokio::fs::write(&path, contents).await.unwrap();
        path
    }

    #[tokio::test]
    async fn skips_blank_and_whitespace_lines() {
        let path = write_temp("coresky-lines.txt", "one\n\n   \ntwo\r\nthree\n").await;
        let lines = read_file_lines(&path).await.unwrap();
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn pairs_are_truncated_to_the_shorter_list() {
        let keys = write_temp("coresky-keys.txt", "k1\nk2\nk3\n").await;
        let proxies = write_temp("coresky-proxies.txt", "p1\np2\n").await;

        let accounts = load_credentials_from(&keys, &proxies).await;
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].private_key, "k1");
        assert_eq!(accounts[0].proxy, "p1");
        assert_eq!(accounts[1].private_key, "k2");
        assert_eq!(accounts[1].proxy, "p2");
    }

    #[tokio::test]
    async fn missing_file_yields_no_accounts() {
        let keys = write_temp("coresky-keys-only.txt", "k1\n").await;
        let accounts =
            load_credentials_from(&keys, "definitely/not/a/real/proxy/file.txt").await;
        assert!(accounts.is_empty());
    }

    #[test]
    fn masks_all_but_prefix_and_suffix() {
        let key = "0xABCDEF1234567890ABCDEF1234567890ABCDEF1234567890ABCDEF1234WXYZ";
        assert_eq!(mask_key(key), "0xABCD...WXYZ");
        assert!(!mask_key(key).contains("EF1234567890"));
    }

    #[test]
    fn short_keys_are_fully_masked() {
        assert_eq!(mask_key("0xABCD"), "***");
    }
}
