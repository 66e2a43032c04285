pub const COMMENT_SYSTEM: &str = include_str!("../data/prompts/comment_system.txt");
pub const COMMENT_USER: &str = include_str!("../data/prompts/comment_user.txt");

pub const DEFAULT_RESPONDER_NAME: &str = "the channel host";
pub const DEFAULT_RESPONDER_PERSONA: &str = "a friendly, upbeat YouTube creator";

const THUMBNAIL_COMPOSITION: &str =
    " Bold, high-contrast composition with a single clear focal point that reads well at small sizes.";
const THUMBNAIL_QUALITY: &str = " Vibrant colors, crisp detail, professional quality.";

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Build the image generation prompt for a video thumbnail.
pub fn thumbnail_prompt(topic: &str, style: Option<&str>, splash_text: Option<&str>) -> String {
    let mut prompt = format!("YouTube thumbnail for a video about {}.", topic);

    if let Some(style) = style.filter(|s| !s.trim().is_empty()) {
        prompt.push_str(&format!(" Style: {}.", style));
    }
    if let Some(splash) = splash_text.filter(|s| !s.trim().is_empty()) {
        prompt.push_str(&format!(" Include the bold headline text \"{}\".", splash));
    }

    prompt.push_str(THUMBNAIL_COMPOSITION);
    prompt.push_str(THUMBNAIL_QUALITY);
    prompt
}
