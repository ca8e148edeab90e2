use std::fs;

const HOSTNAME_FILES: [&str; 2] = ["/proc/sys/kernel/hostname", "/etc/hostname"];

/// Resolve this replica's hostname: `HOSTNAME`, then the kernel/etc files,
/// then `localhost`.
pub fn resolve() -> String {
    if let Some(h) = std::env::var("HOSTNAME").ok().and_then(non_blank) {
        return h;
    }
    HOSTNAME_FILES
        .iter()
        .find_map(|p| fs::read_to_string(p).ok().and_then(non_blank))
        .unwrap_or_else(|| {
            tracing::warn!("hostname not resolvable, using localhost");
            "localhost".to_string()
        })
}

fn non_blank(s: String) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_rejects_blank() {
        assert_eq!(non_blank("web-1\n".into()).as_deref(), Some("web-1"));
        assert_eq!(non_blank("  \n".into()), None);
    }

    #[test]
    fn resolve_never_empty() {
        assert!(!resolve().is_empty());
    }
}
