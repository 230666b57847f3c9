/// One multiple-choice question. Read-only after startup.
pub struct Question {
    pub prompt: &'static str,
    pub choices: [(char, &'static str); 4],
    pub correct: char,
    pub right_feedback: &'static str,
    pub wrong_feedback: &'static str,
}

pub const QUESTION_COUNT: usize = 5;

/// The fixed, ordered question bank.
pub fn questions() -> &'static [Question; QUESTION_COUNT] {
    &BANK
}

static BANK: [Question; QUESTION_COUNT] = [
    Question {
        prompt: "Which of the following converts a type to a signed byte type in C#?",
        choices: [
            ('a', "ToInt64"),
            ('b', "ToSbyte"),
            ('c', "ToSingle"),
            ('d', "ToInt32"),
        ],
        correct: 'b',
        right_feedback: "right answer!!!",
        wrong_feedback: "wrong (((, but do not be sad, it is only the first question",
    },
    Question {
        prompt: "Which of the following access specifiers in C# allows a child class to access \
                 the member variables and member functions of its base class?",
        choices: [
            ('a', "Public"),
            ('b', "Private"),
            ('c', "Protected"),
            ('d', "Internal"),
        ],
        correct: 'c',
        right_feedback: "right answer!!!",
        wrong_feedback: "wrong (((, the right answer is Protected",
    },
    Question {
        prompt: "Which of the following preprocessor directives specifies the end of a \
                 conditional directive in C#?",
        choices: [('a', "elif"), ('b', "endif"), ('c', "if"), ('d', "else")],
        correct: 'b',
        right_feedback: "right answer!!!",
        wrong_feedback: "wrong (((, the right answer is endif",
    },
    Question {
        prompt: "Which of the following is the default access specifier of a class in C#?",
        choices: [
            ('a', "Private"),
            ('b', "Public"),
            ('c', "Protected"),
            ('d', "Internal"),
        ],
        correct: 'd',
        right_feedback: "right answer!!!",
        wrong_feedback: "wrong (((, the right answer is Internal",
    },
    Question {
        prompt: "Which of the following converts a type to a Boolean value, where possible in C#?",
        choices: [
            ('a', "ToBoolean"),
            ('b', "ToSingle"),
            ('c', "ToChar"),
            ('d', "ToDateTime"),
        ],
        correct: 'a',
        right_feedback: "right answer!!!",
        wrong_feedback: "wrong (((, the right answer is ToBoolean",
    },
];

impl Question {
    /// Case-insensitive exact match against the correct letter. Free-form or
    /// empty input simply doesn't match — it is never an error.
    pub fn is_correct(&self, answer: &str) -> bool {
        answer.to_lowercase() == self.correct.to_string()
    }

    /// Full question text: prompt plus all four lettered choices.
    pub fn full_text(&self) -> String {
        let mut text = String::from(self.prompt);
        for (letter, choice) in &self.choices {
            text.push('\n');
            text.push_str(&format!("{} : {}", letter.to_ascii_uppercase(), choice));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_has_five_questions_with_valid_answers() {
        for question in questions() {
            assert!(question
                .choices
                .iter()
                .any(|(letter, _)| *letter == question.correct));
        }
        let correct: Vec<char> = questions().iter().map(|q| q.correct).collect();
        assert_eq!(correct, vec!['b', 'c', 'b', 'd', 'a']);
    }

    #[test]
    fn answer_matching_is_case_insensitive_and_exact() {
        let first = &questions()[0];
        assert!(first.is_correct("b"));
        assert!(first.is_correct("B"));
        assert!(!first.is_correct("ToSbyte"));
        assert!(!first.is_correct(""));
        assert!(!first.is_correct("b "));
    }

    #[test]
    fn full_text_lists_all_choices() {
        let text = questions()[0].full_text();
        assert!(text.contains("signed byte"));
        assert!(text.contains("A : ToInt64"));
        assert!(text.contains("B : ToSbyte"));
        assert!(text.contains("C : ToSingle"));
        assert!(text.contains("D : ToInt32"));
    }
}
