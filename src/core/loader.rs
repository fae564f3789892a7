use std::{
    borrow::Cow,
    collections::{HashMap, HashSet},
    convert::{TryFrom, TryInto},
};

pub struct InputParams {
    params: HashMap<String, InputParamsValue>,
    name: Cow<'static, str>,
    visited_names: HashSet<String>,
}

pub enum InputParamsValue {
    Int(i64),
    Float(f32),
    Bool(bool),
    String(String),
    Array(Vec<InputParamsValue>),
}

macro_rules! params_get {
    ( $( ( $name:ident, $type:ty, $variant:ident, $hint:expr ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                pub fn [<get_ $name>](&mut self, key: &str) -> anyhow::Result<$type> {
                    if let Some(value) = self.params.get(key) {
                        if let InputParamsValue::$variant(value) = value {
                            self.visited_names.insert(key.to_owned());
                            return Ok(*value);
                        }
                        anyhow::bail!(format!("{} - '{}' should be {}", self.name, key, $hint));
                    }
                    anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
                }

                pub fn [<get_ $name _or>](&mut self, key: &str, fallback: $type) -> anyhow::Result<$type> {
                    if self.params.contains_key(key) {
                        self.[<get_ $name>](key)
                    } else {
                        Ok(fallback)
                    }
                }
            }
        )+
    };
}

macro_rules! params_get_vec {
    ( $( ( $name:ident, $type:ty, $len:expr, $variant:ident, $hint:expr ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                pub fn [<get_ $name>](&mut self, key: &str) -> anyhow::Result<[$type; $len]> {
                    if let Some(value) = self.params.get(key) {
                        let error_info = format!(
                            "{} - '{}' should be array with {} {}s",
                            self.name,
                            key,
                            $len,
                            $hint,
                        );
                        if let InputParamsValue::Array(arr) = value {
                            if arr.len() == $len {
                                let mut result: [$type; $len] = Default::default();
                                for i in 0..$len {
                                    if let InputParamsValue::$variant(ele) = arr[i] {
                                        result[i] = ele;
                                    } else {
                                        anyhow::bail!(error_info.clone());
                                    }
                                }
                                self.visited_names.insert(key.to_owned());
                                return Ok(result);
                            }
                        }
                        anyhow::bail!(error_info);
                    }
                    anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
                }

                pub fn [<get_ $name _or>](
                    &mut self,
                    key: &str,
                    fallback: [$type; $len],
                ) -> anyhow::Result<[$type; $len]> {
                    if self.params.contains_key(key) {
                        self.[<get_ $name>](key)
                    } else {
                        Ok(fallback)
                    }
                }
            }
        )+
    };
}

impl InputParams {
    pub fn set_name(&mut self, name: Cow<'static, str>) {
        self.name = name;
    }

    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    params_get! {
        (int, i64, Int, "integer"),
    }

    params_get_vec! {
        (int2, i64, 2, Int, "integer"),
    }

    pub fn get_str(&mut self, key: &str) -> anyhow::Result<String> {
        if let Some(value) = self.params.get(key) {
            if let InputParamsValue::String(value) = value {
                self.visited_names.insert(key.to_owned());
                return Ok(value.clone());
            }
            anyhow::bail!(format!("{} - '{}' should be string", self.name, key));
        }
        anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
    }

    /// Keys starting with '#' are comments.
    pub fn unused_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .params
            .keys()
            .filter(|k| !k.starts_with('#') && !self.visited_names.contains(*k))
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        keys
    }

    pub fn check_unused_keys(&self) {
        for k in self.unused_keys() {
            log::warn!("{} - unused key '{}'", self.name, k);
        }
    }
}

impl TryFrom<&serde_json::Value> for InputParamsValue {
    type Error = anyhow::Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Null => {
                anyhow::bail!("can't convert to InputParamsValue from null json")
            }
            serde_json::Value::Bool(v) => Ok(Self::Bool(*v)),
            serde_json::Value::Number(v) => {
                if let Some(v) = v.as_i64() {
                    Ok(Self::Int(v))
                } else if let Some(v) = v.as_f64() {
                    Ok(Self::Float(v as f32))
                } else {
                    anyhow::bail!(format!("can't convert number '{}'", v))
                }
            }
            serde_json::Value::String(v) => Ok(Self::String(v.clone())),
            serde_json::Value::Array(arr) => {
                let mut values = Vec::<InputParamsValue>::with_capacity(arr.len());
                for v in arr {
                    match v.try_into() {
                        Ok(v) => values.push(v),
                        Err(e) => {
                            anyhow::bail!(format!("can't convert array element: {}", e))
                        }
                    }
                }
                Ok(Self::Array(values))
            }
            serde_json::Value::Object(_) => {
                anyhow::bail!("can't convert to InputParamsValue from object json")
            }
        }
    }
}

impl TryFrom<&serde_json::Value> for InputParams {
    type Error = anyhow::Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        if let serde_json::Value::Object(value) = value {
            let mut params = HashMap::<String, InputParamsValue>::with_capacity(value.len());
            for (k, v) in value {
                match v.try_into() {
                    Ok(v) => {
                        params.insert(k.clone(), v);
                    }
                    Err(e) => {
                        anyhow::bail!(format!("can't convert member '{}': {}", k, e))
                    }
                }
            }
            Ok(Self {
                params,
                name: Cow::Owned("".to_owned()),
                visited_names: HashSet::new(),
            })
        } else {
            anyhow::bail!("can't convert to InputParams from non-object json value");
        }
    }
}
