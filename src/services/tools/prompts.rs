// Prompt templates

pub fn humanize_prompt(text: &str) -> String {
    format!(
        "Rewrite the following text to be:\n\
         Human-like, neutral, and formal.\n\
         Maintain its original meaning and approximate length.\n\
         Do NOT add commentary, labels, or extraneous text.\n\
         Return only the rewritten text.\n\n\
         Original Text:\n{}",
        text
    )
}

pub fn ai_detection_prompt(text: &str) -> String {
    format!(
        r#"Analyze the following text and return only JSON (no explanation). Format:

{{
  "aiGeneratedProbability": number between 0 and 1,
  "humanProbability": number between 0 and 1,
  "confidence": "Low" | "Medium" | "High",
  "patterns": [{{"type": string, "confidence": "Low" | "Medium" | "High"}}]
}}

Text:
"""{}""""#,
        text
    )
}

pub fn plagiarism_prompt(text: &str) -> String {
    format!(
        r#"You are an expert plagiarism detection engine trained to simulate the behavior of research-level plagiarism tools.

Your task is to deeply analyze the given academic or research-style content and estimate the likelihood that this text is plagiarized or copied from existing published research papers, internet articles, academic theses, or AI-generated examples.

Consider:
- Common textbook phrases or frequently reused descriptions
- Lack of originality or generic wording
- Structure or flow that matches known academic templates
- The presence of jargon without unique phrasing
- AI-generated linguistic patterns (predictable tone, grammar, or filler content)

Based on these factors, provide a plagiarism estimation report in this strict JSON format:

{{
  "plagiarismPercentage": number between 0 and 100
}}
Do not include any other text or explanation.

Now analyze this content:
"""{}""""#,
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_embed_text() {
        let text = "Photosynthesis converts light into chemical energy.";
        for prompt in [humanize_prompt(text), ai_detection_prompt(text), plagiarism_prompt(text)] {
            assert!(prompt.contains(text));
        }
    }

    #[test]
    fn test_humanize_prompt_ends_with_original() {
        let prompt = humanize_prompt("abc");
        assert!(prompt.starts_with("Rewrite the following text"));
        assert!(prompt.ends_with("Original Text:\nabc"));
    }

    #[test]
    fn test_json_prompts_name_fields() {
        let detect = ai_detection_prompt("x");
        assert!(detect.contains("\"aiGeneratedProbability\""));
        assert!(detect.contains("\"patterns\""));
        assert!(detect.ends_with("\"\"\"x\"\"\""));
        assert!(plagiarism_prompt("x").contains("\"plagiarismPercentage\""));
    }
}
