/// A request to run one backend script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunRequest {
    /// Script name; `None` selects the catalog's first script
    pub script: Option<String>,
    /// `name=value` pairs supplied on the command line, in order
    pub params: Vec<(String, String)>,
}

impl RunRequest {
    pub fn new(script: Option<String>, params: Vec<(String, String)>) -> Self {
        Self { script, params }
    }

    /// The last supplied value for a parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}
