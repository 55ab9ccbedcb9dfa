//! Prompt templates for summaries and multiple-choice quizzes.
//!
//! The source text is embedded verbatim. Nothing is truncated or chunked, so
//! very large documents are bounded only by the model's context window.

use pdfquiz_core::Difficulty;

const SUMMARY_INSTRUCTION: &str =
    "Please provide a concise, high-quality summary of the following text:";

/// Worked example the model must imitate, one block per quiz item.
const QUIZ_FORMAT_EXAMPLE: &str = "\
**Quiz 1**: What is the primary function of the hippocampus in memory formation?
A) Motor coordination
B) Emotional regulation
C) Encoding new long-term memories
D) Sensory processing
Correct Answer: C

**Quiz 2**: [Question]
A) [Option A]
B) [Option B]
C) [Option C]
D) [Option D]
Correct Answer: [Correct Option Letter]";

pub fn build_summary_prompt(text: &str) -> String {
    format!("{SUMMARY_INSTRUCTION}\n\n{text}")
}

/// Quiz prompt for `count` items at `difficulty`.
///
/// Unrecognized difficulty labels still appear literally, followed by an
/// empty guidance clause.
pub fn build_quiz_prompt(text: &str, count: u32, difficulty: &Difficulty) -> String {
    format!(
        "Generate {count} multiple-choice quizzes based on the following text.\n\
         Each quiz must have 4 options (A, B, C, D) and clearly state the correct answer at the end.\n\
         The quizzes should adhere to a '{label}' difficulty level. {guidance}\n\
         \n\
         Strictly follow this output format for each quiz item:\n\
         {QUIZ_FORMAT_EXAMPLE}\n\
         \n\
         Here is the text to generate quizzes from:\n\
         {text}\n",
        label = difficulty.label(),
        guidance = difficulty.guidance(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &str = "The quick brown fox jumps over the lazy dog. The fox is known for its agility.";

    #[test]
    fn test_summary_prompt_embeds_text() {
        let prompt = build_summary_prompt(FOX);
        assert!(prompt.starts_with("Please provide a concise, high-quality summary"));
        assert!(prompt.ends_with(FOX));
    }

    #[test]
    fn test_quiz_prompt_count_and_label() {
        let prompt = build_quiz_prompt(FOX, 2, &Difficulty::Easy);
        assert!(prompt.starts_with("Generate 2 multiple-choice quizzes"));
        assert!(prompt.contains("a 'Easy' difficulty level."));
        assert!(prompt.contains("Focus on definitions, facts, and directly stated concepts."));
        assert!(prompt.contains(FOX));
    }

    #[test]
    fn test_quiz_prompt_guidance_per_level() {
        for difficulty in Difficulty::SUPPORTED {
            let prompt = build_quiz_prompt("text", 10, &difficulty);
            assert!(prompt.contains(difficulty.guidance()));
            assert!(prompt.contains(&format!("'{}'", difficulty.label())));
        }
    }

    #[test]
    fn test_quiz_prompt_unknown_difficulty_degrades() {
        let prompt = build_quiz_prompt("text", 15, &Difficulty::from("Brutal"));
        assert!(prompt.contains("adhere to a 'Brutal' difficulty level. \n"));
        assert!(!prompt.contains("Focus on"));
        assert!(prompt.contains("Generate 15 multiple-choice"));
    }

    #[test]
    fn test_quiz_prompt_format_example() {
        let prompt = build_quiz_prompt("text", 10, &Difficulty::Normal);
        assert!(prompt.contains("**Quiz 1**: What is the primary function of the hippocampus"));
        for letter in ["A)", "B)", "C)", "D)"] {
            assert!(prompt.contains(letter));
        }
        assert!(prompt.contains("Correct Answer: C\n"));
        assert!(prompt.contains("Correct Answer: [Correct Option Letter]"));
    }

    #[test]
    fn test_quiz_prompt_text_comes_last() {
        let source = "line one\nline two\n";
        let prompt = build_quiz_prompt(source, 10, &Difficulty::Advanced);
        let marker = "Here is the text to generate quizzes from:\n";
        let idx = prompt.find(marker).unwrap();
        assert_eq!(&prompt[idx + marker.len()..], "line one\nline two\n\n");
    }
}
