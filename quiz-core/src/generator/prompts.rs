//! Prompt templates sent to the text generator.
//!
//! Both prompts use a single worked example so the model answers with bare
//! JSON in the expected shape.

use crate::question::QUESTION_COUNT;

/// Instruction asking for the quiz questions on `topic`.
pub fn questions(topic: &str) -> String {
    format!(
        r#"Generate exactly {QUESTION_COUNT} multiple choice questions about {topic}. Return ONLY valid JSON in this exact format:

{{
  "questions": [
    {{
      "question": "What is the primary benefit of regular exercise for mental health?",
      "options": ["Improved sleep quality", "Better focus and concentration", "Reduced stress and anxiety", "All of the above"],
      "correctAnswer": 3,
      "explanation": "Regular exercise provides multiple mental health benefits including better sleep, improved focus, and reduced stress levels."
    }}
  ]
}}

Requirements:
- Each question must be clear and educational
- Provide exactly 4 options per question
- correctAnswer is the index (0-3) of the correct option
- Include a brief explanation for each answer
- Focus on practical, useful knowledge about {topic}
- Make questions moderately challenging but fair

Generate {QUESTION_COUNT} questions now:"#
    )
}

/// Instruction asking for feedback on a finished quiz.
pub fn feedback(score: usize, total: usize, topic: &str) -> String {
    format!(
        r#"Generate personalized feedback for a quiz score. Return ONLY valid JSON in this exact format:

{{
  "feedback": "Great job! You demonstrated solid understanding of wellness concepts. Focus on reviewing nutrition guidelines to improve further.",
  "scoreMessage": "Excellent performance - you're well-informed about wellness practices!"
}}

User scored {score} out of {total} on {topic}.
- If score >= 80%: Enthusiastic congratulations with specific strengths
- If score 60-79%: Encouraging with areas for improvement
- If score < 60%: Supportive with learning suggestions

Keep feedback positive, specific, and actionable. Generate feedback now:"#
    )
}
