//! Prompt text sent to the model. Every builder names the output format it expects back.

use lingo_types::{ContentKind, Difficulty, ExerciseKind, Language};

pub fn translate_word(word: &str, from: &Language, to: &Language) -> String {
    format!(
        "Translate the following {} word or phrase to {}. Only provide the translation, nothing else: \"{word}\"",
        from.name, to.name
    )
}

pub fn explain_word(
    word: &str,
    word_language: &Language,
    explanation_language: &Language,
) -> String {
    format!(
        "Provide a clear and concise explanation of the {} word \"{word}\" in {}. \
         Include its meaning, usage, and context. Keep it brief but informative.",
        word_language.name, explanation_language.name
    )
}

pub fn examples(
    word: &str,
    word_language: &Language,
    example_language: &Language,
    count: usize,
) -> String {
    format!(
        "Generate {count} example sentences using the {} word \"{word}\". Provide the examples in {}. \
         Format each example on a new line, numbered 1., 2., 3., etc.",
        word_language.name, example_language.name
    )
}

pub fn vocabulary_lesson(
    topic: &str,
    target: &Language,
    teaching: &Language,
    difficulty: Difficulty,
    count: usize,
) -> String {
    format!(
        "Generate a vocabulary list for {difficulty} level learners. Topic: \"{topic}\".\n\
         Target language: {}.\n\
         Teaching language: {}.\n\
         Provide {count} words with their translations.\n\
         Format each entry as: word | translation\n\
         One entry per line.",
        target.name, teaching.name
    )
}

pub fn pronunciation(word: &str, language: &Language) -> String {
    format!(
        "Provide the phonetic pronunciation (IPA) for the {} word \"{word}\". \
         Only return the IPA transcription in forward slashes, like /wɜːrd/.",
        language.name
    )
}

pub fn tutor(message: &str, learning: &Language, teaching: &Language) -> String {
    format!(
        "You are a language tutor. The student is learning {}, and you should teach in {}.\n\n\
         Student's message: \"{message}\"\n\n\
         Provide a helpful, encouraging response. Be concise but informative.",
        learning.name, teaching.name
    )
}

pub fn learning_content(
    kind: ContentKind,
    learning: &Language,
    teaching: &Language,
    level: Difficulty,
    topic: &str,
) -> String {
    let (learning, teaching) = (learning.name, teaching.name);
    match kind {
        ContentKind::Vocabulary => format!(
            "Generate 8 {level} level vocabulary words in {learning} related to \"{topic}\".\n\
             For each word provide:\n\
             - The word in {learning}\n\
             - Translation in {teaching}\n\
             - A simple example sentence\n\n\
             Format as JSON array: [{{\"word\": \"...\", \"translation\": \"...\", \"example\": \"...\"}}]"
        ),
        ContentKind::Sentences => format!(
            "Generate 5 common {level} level sentences in {learning} about \"{topic}\".\n\
             For each sentence provide:\n\
             - The sentence in {learning}\n\
             - Translation in {teaching}\n\
             - Grammar explanation in {teaching}\n\
             - Key vocabulary words used\n\n\
             Format as JSON array: [{{\"sentence\": \"...\", \"translation\": \"...\", \"grammar\": \"...\", \"vocabulary\": [\"...\"]}}]"
        ),
        ContentKind::Grammar => format!(
            "Explain a key {level} level grammar concept in {learning} related to \"{topic}\".\n\
             Provide:\n\
             - Grammar rule title\n\
             - Clear explanation in {teaching}\n\
             - 3 example sentences\n\
             - Common mistakes to avoid\n\n\
             Format as JSON: {{\"title\": \"...\", \"explanation\": \"...\", \"examples\": [...], \"mistakes\": [...]}}"
        ),
    }
}

pub fn translate_sentence(
    sentence: &str,
    from: &Language,
    to: &Language,
    with_analysis: bool,
) -> String {
    if with_analysis {
        format!(
            "Translate this {} sentence to {} and provide analysis:\n\n\
             Sentence: \"{sentence}\"\n\n\
             Provide:\n\
             1. Translation\n\
             2. Word-by-word breakdown\n\
             3. Grammar structure explanation\n\n\
             Format as JSON: {{\"translation\": \"...\", \"analysis\": \"...\", \"wordByWord\": [{{\"word\": \"...\", \"translation\": \"...\"}}]}}",
            from.name, to.name
        )
    } else {
        format!(
            "Translate this {} sentence to {}: \"{sentence}\"\n\n\
             Only provide the translation, nothing else.",
            from.name, to.name
        )
    }
}

pub fn analyze_mistake(
    question: &str,
    user_answer: &str,
    correct_answer: &str,
    learning: &Language,
    teaching: &Language,
) -> String {
    format!(
        "Analyze the student's language mistake in {}. Provide feedback in {}.\n\n\
         Question/Task: {question}\n\
         Student's answer: \"{user_answer}\"\n\
         Correct answer: \"{correct_answer}\"\n\n\
         Provide:\n\
         1. Overall analysis of the mistake\n\
         2. Specific grammar issues (if any)\n\
         3. Vocabulary issues (word choice, spelling, etc.)\n\
         4. Helpful suggestions for improvement\n\n\
         Format as JSON: {{\"analysis\": \"...\", \"grammarIssues\": [\"...\"], \"vocabularyIssues\": [\"...\"], \"suggestions\": \"...\"}}",
        learning.name, teaching.name
    )
}

pub fn exercises(
    kind: ExerciseKind,
    learning: &Language,
    level: Difficulty,
    topic: &str,
) -> String {
    let learning = learning.name;
    match kind {
        ExerciseKind::Translation => format!(
            "Generate 5 {level} level translation exercises for {learning} learners about \"{topic}\".\n\n\
             Format as JSON array: [{{\"question\": \"Translate to {learning}: ...\", \"answer\": \"...\", \"hint\": \"...\"}}]"
        ),
        ExerciseKind::FillInBlank => format!(
            "Generate 5 {level} level fill-in-the-blank exercises in {learning} about \"{topic}\".\n\n\
             Format as JSON array: [{{\"sentence\": \"... ___ ...\", \"answer\": \"...\", \"options\": [\"...\", \"...\", \"...\"], \"explanation\": \"...\"}}]"
        ),
        ExerciseKind::MultipleChoice => format!(
            "Generate 5 {level} level multiple choice questions for {learning} about \"{topic}\".\n\n\
             Format as JSON array: [{{\"question\": \"...\", \"options\": [\"A. ...\", \"B. ...\", \"C. ...\", \"D. ...\"], \"correctAnswer\": \"A\", \"explanation\": \"...\"}}]"
        ),
    }
}
