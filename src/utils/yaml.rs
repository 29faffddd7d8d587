use serde_yaml::{self, Mapping, Value};

/// Wrapper around serde_yaml::Value for building generated configs
///
/// Mappings keep insertion order. Keys set to a null value are left out,
/// so optional fields can be passed straight through as `Option`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct YamlNode {
    pub value: Value,
}

impl YamlNode {
    /// Create a new null YAML node
    pub fn new() -> Self {
        YamlNode { value: Value::Null }
    }

    /// Create a new empty mapping
    pub fn map() -> Self {
        YamlNode {
            value: Value::Mapping(Mapping::new()),
        }
    }

    /// Insert `key` into a mapping node, returning the node for chaining.
    /// Null values and non-mapping nodes are left unchanged.
    pub fn with(mut self, key: &str, value: impl Into<YamlNode>) -> Self {
        let value = value.into().value;
        if value.is_null() {
            return self;
        }
        if let Value::Mapping(ref mut map) = self.value {
            map.insert(Value::String(key.to_string()), value);
        }
        self
    }

    /// Convert the YAML node to a string
    pub fn to_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.value)
    }
}

impl From<Value> for YamlNode {
    fn from(value: Value) -> Self {
        YamlNode { value }
    }
}

impl From<bool> for YamlNode {
    fn from(value: bool) -> Self {
        Value::Bool(value).into()
    }
}

impl From<u16> for YamlNode {
    fn from(value: u16) -> Self {
        Value::Number(value.into()).into()
    }
}

impl From<u32> for YamlNode {
    fn from(value: u32) -> Self {
        Value::Number(value.into()).into()
    }
}

impl From<&str> for YamlNode {
    fn from(value: &str) -> Self {
        Value::String(value.to_string()).into()
    }
}

impl From<String> for YamlNode {
    fn from(value: String) -> Self {
        Value::String(value).into()
    }
}

impl<T: Into<YamlNode>> From<Option<T>> for YamlNode {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(YamlNode::new, Into::into)
    }
}

impl<T: Into<YamlNode>> From<Vec<T>> for YamlNode {
    fn from(value: Vec<T>) -> Self {
        Value::Sequence(value.into_iter().map(|item| item.into().value).collect()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(node: &YamlNode) -> Value {
        serde_yaml::from_str(&node.to_string().unwrap()).unwrap()
    }

    #[test]
    fn test_nested_output() {
        let doc = YamlNode::map()
            .with(
                "proxies",
                vec![YamlNode::map()
                    .with("name", "HK 01")
                    .with("port", 443u16)
                    .with("udp", true)
                    .with("ws-opts", YamlNode::map().with("path", "/ws"))],
            )
            .with("skipped", None::<&str>)
            .with("names", vec!["a", "b"]);

        let parsed = parse(&doc);
        let keys: Vec<&str> = parsed
            .as_mapping()
            .unwrap()
            .keys()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(keys, vec!["proxies", "names"]);

        let proxy = &parsed["proxies"][0];
        assert_eq!(proxy["name"].as_str(), Some("HK 01"));
        assert_eq!(proxy["port"].as_u64(), Some(443));
        assert_eq!(proxy["udp"].as_bool(), Some(true));
        assert_eq!(proxy["ws-opts"]["path"].as_str(), Some("/ws"));
        assert_eq!(parsed["names"][1].as_str(), Some("b"));
    }

    #[test]
    fn test_scalar_like_strings_stay_strings() {
        let values = [
            "0x1F", "0o17", ".inf", ".nan", "8388", "1e3", "true", "no", "~", "null", "",
            "a: b # c", "-leading", "p@ss:word",
        ];
        let doc = YamlNode::map().with("values", values.to_vec());
        let parsed = parse(&doc);
        for (i, expected) in values.iter().enumerate() {
            assert_eq!(parsed["values"][i].as_str(), Some(*expected), "{}", expected);
        }
    }

    #[test]
    fn test_empty_collections() {
        let doc = YamlNode::map()
            .with("proxies", Vec::<YamlNode>::new())
            .with("headers", YamlNode::map());
        let parsed = parse(&doc);
        assert!(parsed["proxies"].as_sequence().unwrap().is_empty());
        assert!(parsed["headers"].as_mapping().unwrap().is_empty());
    }

    #[test]
    fn test_with_on_non_mapping() {
        let node = YamlNode::from("plain").with("key", "value");
        assert_eq!(node.value, Value::String("plain".to_string()));
    }
}
