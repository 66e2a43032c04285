//! Image pipeline: generate, persist, thumbnail, assemble.
//!
//! Each stage takes the [`ImageArtifacts`] produced so far by value and hands
//! back an updated copy, so partial results never live in shared state.

use crate::ai::{select_generator, GeneratedImage, ImageGenerator, ImageJob};
use crate::config::ProviderConfig;
use crate::image::Thumbnailer;
use crate::models::{ImageArtifacts, ImageRequest};
use crate::prompts;
use crate::storage::{self, UploadStore};
use crate::{Error, Result};
use reqwest::Client;
use tracing::{info, warn};

pub fn required_topic(request: &ImageRequest) -> Result<&str> {
    request
        .topic
        .as_deref()
        .filter(|topic| !topic.trim().is_empty())
        .ok_or_else(|| Error::Validation("missing field: topic".to_string()))
}

/// Build the provider job for a request.
pub fn build_job(request: &ImageRequest, topic: &str) -> ImageJob {
    ImageJob {
        model: request.model().to_string(),
        prompt: prompts::thumbnail_prompt(
            topic,
            request.style.as_deref(),
            request.splash_text.as_deref(),
        ),
        size: request.size,
    }
}

/// Stage 1: ask the provider for an image.
pub async fn generate(generator: &dyn ImageGenerator, job: &ImageJob) -> Result<GeneratedImage> {
    info!(
        strategy = generator.strategy(),
        model = %job.model,
        size = job.size.as_str(),
        "Generating image"
    );
    generator.generate(job).await
}

/// Stage 2: write the generated image into the uploads directory.
pub async fn persist(
    mut artifacts: ImageArtifacts,
    image: GeneratedImage,
    topic: &str,
    store: &UploadStore,
    client: &Client,
) -> Result<ImageArtifacts> {
    store.ensure_dir().await?;
    let file_name = storage::image_file_name(topic);

    match image {
        GeneratedImage::Base64(b64) => {
            store.write_base64(&file_name, &b64).await?;
        }
        GeneratedImage::Url(url) => {
            store.download(client, &url, &file_name).await?;
            artifacts.url = Some(url);
        }
    }

    info!("Stored image {}", store.path_for(&file_name).display());
    artifacts.file = Some(file_name);
    Ok(artifacts)
}

/// Stage 3: derive a thumbnail. Never fails; problems only drop `thumb`.
pub async fn thumbnail(
    mut artifacts: ImageArtifacts,
    store: &UploadStore,
    thumbnailer: &Thumbnailer,
) -> ImageArtifacts {
    let Some(file_name) = artifacts.file.as_deref() else {
        return artifacts;
    };

    let source = store.path_for(file_name);
    if !tokio::fs::try_exists(&source).await.unwrap_or(false) {
        return artifacts;
    }

    let thumb_name = storage::thumbnail_file_name(file_name);
    let target = store.path_for(&thumb_name);

    match thumbnailer.render(&source, &target).await {
        Ok(()) => artifacts.thumb = Some(thumb_name),
        Err(e) => warn!("Thumbnail creation failed for {}: {}", source.display(), e),
    }

    artifacts
}

/// Run every stage with an already chosen generator.
pub async fn run_with_generator(
    generator: &dyn ImageGenerator,
    request: &ImageRequest,
    store: &UploadStore,
    client: &Client,
) -> Result<ImageArtifacts> {
    let topic = required_topic(request)?;
    let job = build_job(request, topic);

    let image = generate(generator, &job).await?;
    let artifacts = persist(ImageArtifacts::default(), image, topic, store, client).await?;
    Ok(thumbnail(artifacts, store, &Thumbnailer::default()).await)
}

/// Validate, select a generation strategy from configuration, run the stages.
pub async fn run(
    config: &ProviderConfig,
    request: ImageRequest,
    store: &UploadStore,
    client: &Client,
) -> Result<ImageArtifacts> {
    required_topic(&request)?;
    let generator = select_generator(config, client.clone())?;
    run_with_generator(generator.as_ref(), &request, store, client).await
}
