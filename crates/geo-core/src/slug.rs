use rand::Rng;

const MAX_BASE_LEN: usize = 50;

/// Turns a free-text scenario name into a safe, filesystem- and URL-friendly
/// slug: lowercase, non-alphanumeric runs collapsed to `_`, leading/trailing
/// `_` trimmed, forced to start with a letter, truncated, then suffixed with
/// a random 6-hex-char tag to disambiguate repeated runs of the same name.
pub fn scenario_slug(name: &str) -> String {
    let base = base_slug(name);
    format!("{base}_{}", random_hex_suffix())
}

/// The sanitization step alone, without the random suffix — split out so it
/// stays independently testable against the exact rule it mirrors.
pub fn base_slug(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let mut value = String::with_capacity(lowered.len());
    let mut last_was_sep = false;
    for ch in lowered.chars() {
        if ch.is_ascii_alphanumeric() {
            value.push(ch);
            last_was_sep = false;
        } else if !last_was_sep {
            value.push('_');
            last_was_sep = true;
        }
    }
    let trimmed = value.trim_matches('_').to_string();
    let mut result = if trimmed.is_empty() {
        "scenario".to_string()
    } else {
        trimmed
    };
    if !result.chars().next().map(|c| c.is_alphabetic()).unwrap_or(false) {
        result = format!("s_{result}");
    }
    result.truncate(MAX_BASE_LEN);
    result
}

fn random_hex_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..6)
        .map(|_| std::char::from_digit(rng.gen_range(0..16), 16).unwrap())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_punctuation_and_case() {
        assert_eq!(base_slug("Atlanta Public Schools!!"), "atlanta_public_schools");
    }

    #[test]
    fn empty_name_falls_back_to_scenario() {
        assert_eq!(base_slug(""), "scenario");
        assert_eq!(base_slug("   "), "scenario");
        assert_eq!(base_slug("!!!"), "scenario");
    }

    #[test]
    fn forces_leading_letter() {
        assert_eq!(base_slug("2026 rollout"), "s_2026_rollout");
    }

    #[test]
    fn truncates_to_fifty_chars() {
        let long = "a".repeat(80);
        assert_eq!(base_slug(&long).len(), MAX_BASE_LEN);
    }

    #[test]
    fn full_slug_has_hex_suffix() {
        let slug = scenario_slug("South Fulton Middle");
        let (base, suffix) = slug.rsplit_once('_').unwrap();
        assert_eq!(base, "south_fulton_middle");
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
