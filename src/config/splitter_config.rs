use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::char_predicate::CharPredicate;
use crate::core::separator::{Separator, SeparatorLocator};
use crate::core::splitter::Splitter;
use crate::error::{Error, Result};

/// Declarative form of a [`Splitter`], as read from YAML.
///
/// Exactly one of `on`, `on_any_of`, `pattern` and `fixed_length` names the separator.
///
/// ```yaml
/// on: ", "
/// trim_whitespace: true
/// omit_empty_strings: true
/// limit: 2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitterConfig {
    // literal separator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<String>,
    // every listed char separates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_any_of: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_length: Option<usize>,
    pub trim_whitespace: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trim_chars: Option<String>,
    pub omit_empty_strings: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl SplitterConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = fs::read_to_string(path.as_ref())?;
        debug!("loading splitter config from {}", path.as_ref().display());
        Self::from_yaml(&yaml)
    }

    fn separator(&self) -> Result<Separator> {
        let given = [
            self.on.is_some(),
            self.on_any_of.is_some(),
            self.pattern.is_some(),
            self.fixed_length.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();
        if given > 1 {
            return Err(Error::InvalidConfig(
                "only one of `on`, `on_any_of`, `pattern` and `fixed_length` may be set".into(),
            ));
        }

        if let Some(literal) = &self.on {
            Separator::on_str(literal)
        } else if let Some(chars) = &self.on_any_of {
            if chars.is_empty() {
                return Err(Error::EmptySeparator);
            }
            Ok(Separator::on_predicate(CharPredicate::any_of(chars)))
        } else if let Some(pattern) = &self.pattern {
            Separator::on_pattern(pattern)
        } else if let Some(chunk_len) = self.fixed_length {
            Separator::fixed_length(chunk_len)
        } else {
            Err(Error::MissingArgument("separator"))
        }
    }

    fn trimmer(&self) -> CharPredicate {
        match (self.trim_whitespace, self.trim_chars.as_deref()) {
            (false, None) => CharPredicate::none(),
            (true, None) => CharPredicate::whitespace(),
            (false, Some(chars)) => CharPredicate::any_of(chars),
            (true, Some(chars)) => CharPredicate::whitespace().or(CharPredicate::any_of(chars)),
        }
    }

    pub fn build(&self) -> Result<Splitter> {
        let mut splitter =
            Splitter::with_separator(self.separator()?).trim_results_with(self.trimmer());
        if self.omit_empty_strings {
            splitter = splitter.omit_empty_strings();
        }
        if let Some(limit) = self.limit {
            splitter = splitter.limit(limit)?;
        }
        Ok(splitter)
    }
}

/// Builds every splitter of a YAML map `name -> SplitterConfig`.
pub fn load_splitters(yaml: &str) -> Result<BTreeMap<String, Splitter>> {
    let configs: BTreeMap<String, SplitterConfig> = serde_yaml::from_str(yaml)?;
    let mut splitters = BTreeMap::new();
    for (name, config) in configs {
        match config.build() {
            Ok(splitter) => {
                debug!("splitter `{}` uses a {} separator", name, splitter.separator().name());
                splitters.insert(name, splitter);
            }
            Err(e) => {
                warn!("splitter `{}` is invalid: {}", name, e);
                return Err(e);
            }
        }
    }
    Ok(splitters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_with_options() {
        let config = SplitterConfig::from_yaml(
            r#"
on: ", "
trim_whitespace: true
omit_empty_strings: true
limit: 2
"#,
        )
        .unwrap();
        assert_eq!(config.limit, Some(2));
        let splitter = config.build().unwrap();
        assert_eq!(splitter.split_to_list("a, ,  b, c, d"), vec!["a", "b, c, d"]);
    }

    #[test]
    fn each_separator_kind() {
        let any_of = SplitterConfig::from_yaml("on_any_of: ',;'").unwrap().build().unwrap();
        assert_eq!(any_of.split_to_list("a,b;c"), vec!["a", "b", "c"]);

        let pattern = SplitterConfig::from_yaml(r"pattern: '\s+'").unwrap().build().unwrap();
        assert_eq!(pattern.split_to_list("a  b\tc"), vec!["a", "b", "c"]);

        let fixed = SplitterConfig::from_yaml("fixed_length: 3").unwrap().build().unwrap();
        assert_eq!(fixed.split_to_list("abcdefg"), vec!["abc", "def", "g"]);
    }

    #[test]
    fn trim_chars_combine_with_whitespace() {
        let config = SplitterConfig {
            on: Some("|".into()),
            trim_whitespace: true,
            trim_chars: Some("*".into()),
            ..Default::default()
        };
        let splitter = config.build().unwrap();
        assert_eq!(splitter.split_to_list(" *a* | b*x "), vec!["a", "b*x"]);
    }

    #[test]
    fn missing_separator() {
        let config = SplitterConfig::from_yaml("omit_empty_strings: true").unwrap();
        assert!(matches!(config.build(), Err(Error::MissingArgument("separator"))));
    }

    #[test]
    fn conflicting_separators() {
        let config = SplitterConfig::from_yaml("on: ','\nfixed_length: 2").unwrap();
        assert!(matches!(config.build(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn invalid_values_fail_at_build() {
        let build = |yaml: &str| SplitterConfig::from_yaml(yaml).unwrap().build();
        assert!(matches!(build("on: ''"), Err(Error::EmptySeparator)));
        assert!(matches!(build("on_any_of: ''"), Err(Error::EmptySeparator)));
        assert!(matches!(build("pattern: 'x*'"), Err(Error::EmptyMatchingPattern(_))));
        assert!(matches!(build("fixed_length: 0"), Err(Error::InvalidChunkLength(0))));
        assert!(matches!(build("on: ','\nlimit: 0"), Err(Error::InvalidLimit(0))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            SplitterConfig::from_yaml("on: ','\ntrim: true"),
            Err(Error::Yaml(_))
        ));
    }

    #[test]
    fn serializes_only_what_is_set() {
        let config = SplitterConfig {
            pattern: Some(r"\s+".into()),
            omit_empty_strings: true,
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(!yaml.contains("limit"));
        assert_eq!(SplitterConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn named_splitters() {
        let splitters = load_splitters(
            r#"
csv:
  on: ","
  trim_whitespace: true
words:
  pattern: '\s+'
  omit_empty_strings: true
"#,
        )
        .unwrap();
        assert_eq!(splitters.len(), 2);
        assert_eq!(splitters["csv"].split_to_list(" a , b"), vec!["a", "b"]);
        assert_eq!(splitters["words"].split_to_list(" hello  world "), vec!["hello", "world"]);

        assert!(matches!(
            load_splitters("bad:\n  fixed_length: 0"),
            Err(Error::InvalidChunkLength(0))
        ));
    }
}
