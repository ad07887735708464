// Prompt text sent to the text-generation service.

/// Quote generation prompt. The response grammar it asks for is what
/// `quotes::parser` understands; change both together.
pub const QUOTE_PROMPT: &str = "Generate one inspiring quote for social media. \
Return ONLY this format with no extra text:

ENGLISH: [motivational quote with emojis and 2-3 hashtags, max 280 chars]
FRENCH: [same quote in French with emojis and hashtags, max 280 chars]
KEYWORD: [one keyword for image search]";
