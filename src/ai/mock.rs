use super::image::{ImageGenerator, ImageJob};
use super::GeneratedImage;
use crate::{Error, Result};
use async_trait::async_trait;
use base64::Engine as _;
use std::sync::{Arc, Mutex};

/// Encode a solid-color PNG of the given dimensions.
pub fn sample_png(width: u32, height: u32) -> Result<Vec<u8>> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 40, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

pub struct MockImageGenerator {
    responses: Arc<Mutex<Vec<GeneratedImage>>>,
    jobs: Arc<Mutex<Vec<ImageJob>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockImageGenerator {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            jobs: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_response(self, response: GeneratedImage) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    pub fn with_failure(self, should_fail: bool) -> Self {
        *self.should_fail.lock().unwrap() = should_fail;
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }

    /// Jobs received so far, in call order.
    pub fn jobs(&self) -> Vec<ImageJob> {
        self.jobs.lock().unwrap().clone()
    }
}

impl Default for MockImageGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    fn strategy(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, job: &ImageJob) -> Result<GeneratedImage> {
        let call = {
            let mut jobs = self.jobs.lock().unwrap();
            jobs.push(job.clone());
            jobs.len()
        };

        if *self.should_fail.lock().unwrap() {
            return Err(Error::Upstream("Mock failure".to_string()));
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default: a tiny valid PNG as inline data
            Ok(GeneratedImage::Base64(
                base64::engine::general_purpose::STANDARD.encode(sample_png(1, 1)?),
            ))
        } else {
            Ok(responses[(call - 1) % responses.len()].clone())
        }
    }
}
