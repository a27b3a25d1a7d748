use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Demand metrics accepted at the HTTP boundary. Wider than the original
/// pipeline's own `VALID_METRICS` (which lacks `certified_teachers`) because
/// the public scenario API documents all eight of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemandMetric {
    Sfr,
    CsEnrollment,
    CertifiedTeachers,
    RiAsian,
    RiBlack,
    RiHispanic,
    RiWhite,
    RiFemale,
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown demand metric '{0}'")]
pub struct UnknownMetric(pub String);

impl FromStr for DemandMetric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().trim() {
            "sfr" => Ok(DemandMetric::Sfr),
            "cs_enrollment" => Ok(DemandMetric::CsEnrollment),
            "certified_teachers" => Ok(DemandMetric::CertifiedTeachers),
            "ri_asian" => Ok(DemandMetric::RiAsian),
            "ri_black" => Ok(DemandMetric::RiBlack),
            "ri_hispanic" => Ok(DemandMetric::RiHispanic),
            "ri_white" => Ok(DemandMetric::RiWhite),
            "ri_female" => Ok(DemandMetric::RiFemale),
            other => Err(UnknownMetric(other.to_string())),
        }
    }
}

impl fmt::Display for DemandMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            DemandMetric::Sfr => "sfr",
            DemandMetric::CsEnrollment => "cs_enrollment",
            DemandMetric::CertifiedTeachers => "certified_teachers",
            DemandMetric::RiAsian => "ri_asian",
            DemandMetric::RiBlack => "ri_black",
            DemandMetric::RiHispanic => "ri_hispanic",
            DemandMetric::RiWhite => "ri_white",
            DemandMetric::RiFemale => "ri_female",
        };
        write!(f, "{tag}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_documented_tags() {
        for tag in [
            "sfr",
            "cs_enrollment",
            "certified_teachers",
            "ri_asian",
            "ri_black",
            "ri_hispanic",
            "ri_white",
            "ri_female",
        ] {
            let metric: DemandMetric = tag.parse().unwrap();
            assert_eq!(metric.to_string(), tag);
        }
    }

    #[test]
    fn rejects_unknown_tag() {
        assert_eq!(
            "bogus".parse::<DemandMetric>(),
            Err(UnknownMetric("bogus".to_string()))
        );
    }
}
