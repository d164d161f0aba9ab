use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Communities represents the full set of routing-policy communities.
/// Constructed once from input and never mutated afterwards; the pipeline
/// only ever hands out shared references or whole-value clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Communities {
    pub std_communities: BTreeMap<String, String>,
    #[serde(default)]
    pub other_communities: Option<BTreeMap<String, String>>,
}

/// Flat name -> value secrets mapping attached to every device
pub type Secrets = BTreeMap<String, String>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_std_and_optional_other_communities() {
        let communities: Communities = serde_yaml::from_str(
            r#"
std_communities:
  COMMUNITY_1: '1:1'
  COMMUNITY_2: '2:2'
  COMMUNITY_3: '3:3'
"#,
        )
        .unwrap();

        assert_eq!(communities.std_communities.len(), 3);
        assert_eq!(
            communities.std_communities.get("COMMUNITY_1"),
            Some(&"1:1".to_string())
        );
        assert_eq!(communities.other_communities, None);
    }

    #[test]
    fn serializes_with_stable_key_order() {
        let communities: Communities = serde_yaml::from_str(
            r#"
std_communities:
  ZEBRA: '9:9'
  ALPHA: '1:1'
"#,
        )
        .unwrap();

        let json = serde_json::to_string(&communities).unwrap();
        let alpha = json.find("ALPHA").unwrap();
        let zebra = json.find("ZEBRA").unwrap();
        assert!(alpha < zebra, "keys must sort deterministically");
    }
}
