use crate::config::EndpointsConfig;

/// URL builder for the file server routes.
///
/// Filenames are percent-encoded as a single path segment, so names with
/// spaces, `#`, `?` or `/` address the file they name.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    cfg: EndpointsConfig,
}

impl Endpoints {
    pub fn new(cfg: EndpointsConfig) -> Self {
        Self { cfg }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.cfg.base, path)
    }

    pub fn upload(&self) -> String {
        self.url(&self.cfg.upload)
    }

    pub fn files(&self) -> String {
        self.url(&self.cfg.files)
    }

    pub fn download(&self, name: &str) -> String {
        format!("{}/{}", self.url(&self.cfg.download), urlencoding::encode(name))
    }

    pub fn delete(&self, name: &str) -> String {
        format!("{}/{}", self.url(&self.cfg.delete), urlencoding::encode(name))
    }
}
