use std::collections::HashMap;
use std::str::FromStr;

/// Command-line arguments split into positional symbols and `key=value`
/// pairs.
#[derive(Debug)]
pub struct ArgVals {
    simple_vals: Vec<String>,
    mapped_vals: HashMap<String, String>,
}

impl Default for ArgVals {
    fn default() -> Self {
        Self::from_args(std::env::args().skip(1))
    }
}

impl ArgVals {
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut simple_vals = vec![];
        let mut mapped_vals = HashMap::new();
        for arg in args {
            match arg.split_once('=') {
                Some((key, value)) => {
                    mapped_vals.insert(key.to_string(), value.to_string());
                }
                None => simple_vals.push(arg),
            }
        }
        Self {
            simple_vals,
            mapped_vals,
        }
    }

    pub fn len(&self) -> usize {
        self.simple_vals.len() + self.mapped_vals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_symbol(&self, i: usize) -> Option<&str> {
        self.simple_vals.get(i).map(|s| s.as_str())
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.simple_vals.iter().any(|s| s == flag)
    }

    pub fn get_value<T: FromStr>(&self, key: &str) -> Option<T> {
        self.mapped_vals.get(key).and_then(|v| v.parse().ok())
    }
}
