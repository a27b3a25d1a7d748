use std::str::FromStr;

/// Which of the three formulations a scenario run should solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelChoice {
    Pmedian,
    Lscp,
    Mclp,
    All,
}

impl ModelChoice {
    pub fn runs_pmedian(&self) -> bool {
        matches!(self, ModelChoice::Pmedian | ModelChoice::All)
    }

    pub fn runs_lscp(&self) -> bool {
        matches!(self, ModelChoice::Lscp | ModelChoice::All)
    }

    pub fn runs_mclp(&self) -> bool {
        matches!(self, ModelChoice::Mclp | ModelChoice::All)
    }
}

impl Default for ModelChoice {
    fn default() -> Self {
        ModelChoice::All
    }
}

impl FromStr for ModelChoice {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pmedian" => Ok(ModelChoice::Pmedian),
            "lscp" => Ok(ModelChoice::Lscp),
            "mclp" => Ok(ModelChoice::Mclp),
            "all" | "" => Ok(ModelChoice::All),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_model_falls_back_to_caller_handling() {
        assert!("bogus".parse::<ModelChoice>().is_err());
    }

    #[test]
    fn blank_model_means_all() {
        assert_eq!("".parse::<ModelChoice>().unwrap(), ModelChoice::All);
    }
}
