//! Full-screen image viewer collaborator.

/// Modal viewer over a painting's images.
pub trait Lightbox {
    /// Show `main_url` followed by `additional_urls`, starting at `start_index`
    /// (0 = main image).
    fn open(&mut self, main_url: &str, additional_urls: &[String], start_index: usize);
    fn close(&mut self);
}

/// Simple image carousel with wrap-around navigation.
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    urls: Vec<String>,
    index: usize,
    open: bool,
}

impl Carousel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn current_url(&self) -> Option<&str> {
        if !self.open {
            return None;
        }
        self.urls.get(self.index).map(String::as_str)
    }

    pub fn next(&mut self) {
        if !self.urls.is_empty() {
            self.index = (self.index + 1) % self.urls.len();
        }
    }

    pub fn previous(&mut self) {
        if !self.urls.is_empty() {
            self.index = (self.index + self.urls.len() - 1) % self.urls.len();
        }
    }
}

impl Lightbox for Carousel {
    fn open(&mut self, main_url: &str, additional_urls: &[String], start_index: usize) {
        self.urls.clear();
        self.urls.push(main_url.to_string());
        self.urls.extend(additional_urls.iter().cloned());
        self.index = start_index.min(self.urls.len() - 1);
        self.open = true;
        log::debug!("Lightbox open at {}/{}", self.index + 1, self.urls.len());
    }

    fn close(&mut self) {
        self.open = false;
        self.urls.clear();
        self.index = 0;
    }
}
