/*
 * Responsibility
 * - read secrets for collaborator handlers (login)
 * - `{NAME}_FILE` (file-mounted secret, e.g. CSI volume) wins over the `{NAME}` env var
 * - an empty secret counts as "not configured"
 */
use std::path::Path;

pub trait SecretProvider: Send + Sync {
    fn read(&self, name: &str) -> Option<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecretProvider;

impl SecretProvider for EnvSecretProvider {
    fn read(&self, name: &str) -> Option<String> {
        read_secret_with(name, |key| std::env::var(key).ok())
    }
}

fn read_secret_with<F>(name: &str, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let value = match lookup(&format!("{name}_FILE")).filter(|p| Path::new(p).exists()) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                tracing::warn!(error = %err, secret = name, "failed to read secret file");
                String::new()
            }
        },
        None => lookup(name).unwrap_or_default(),
    };

    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, String)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn env_value_is_trimmed() {
        let value = read_secret_with("APP_PASSWORD", lookup(&[("APP_PASSWORD", " s3cret\n".into())]));
        assert_eq!(value.as_deref(), Some("s3cret"));
    }

    #[test]
    fn missing_or_blank_is_none() {
        assert_eq!(read_secret_with("APP_PASSWORD", lookup(&[])), None);
        assert_eq!(
            read_secret_with("APP_PASSWORD", lookup(&[("APP_PASSWORD", "   ".into())])),
            None
        );
    }

    #[test]
    fn file_wins_over_env() {
        let path = std::env::temp_dir().join(format!("policy-gate-secret-{}", std::process::id()));
        std::fs::write(&path, "from-file\n").unwrap();

        let value = read_secret_with(
            "APP_PASSWORD",
            lookup(&[
                ("APP_PASSWORD_FILE", path.display().to_string()),
                ("APP_PASSWORD", "from-env".into()),
            ]),
        );
        std::fs::remove_file(&path).unwrap();

        assert_eq!(value.as_deref(), Some("from-file"));
    }

    #[test]
    fn missing_file_falls_back_to_env() {
        let value = read_secret_with(
            "APP_PASSWORD",
            lookup(&[
                ("APP_PASSWORD_FILE", "/nonexistent/policy-gate/secret".into()),
                ("APP_PASSWORD", "from-env".into()),
            ]),
        );
        assert_eq!(value.as_deref(), Some("from-env"));
    }
}
