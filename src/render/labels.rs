//! 两种输出格式共用的文案与编号

/// 答错题目的标签后缀
pub const WRONG_ANSWER_MARKER: &str = "[WRONG ANSWER]";

/// 解析小节标题
pub const FEEDBACK_LABEL: &str = "Feedback:";

/// 选项字母：0 → A，1 → B，…，25 → Z
///
/// 超过 26 个选项时按表格列名方式继续（AA、AB…）
pub fn answer_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// 选项行：`A. 文本`
pub fn answer_line(index: usize, text: &str) -> String {
    format!("{}. {}", answer_letter(index), text)
}

/// 题目标签：`Question N:`，答错时追加标记
///
/// `number` 从 1 开始
pub fn question_label(number: usize, is_incorrect: bool) -> String {
    if is_incorrect {
        format!("Question {}: {}", number, WRONG_ANSWER_MARKER)
    } else {
        format!("Question {}:", number)
    }
}

pub fn total_line(count: usize) -> String {
    format!("Total Questions: {}", count)
}

pub fn incorrect_line(count: usize) -> String {
    format!("Incorrect Answers: {}", count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_letters() {
        assert_eq!(answer_letter(0), "A");
        assert_eq!(answer_letter(1), "B");
        assert_eq!(answer_letter(25), "Z");
        assert_eq!(answer_letter(26), "AA");
    }

    #[test]
    fn test_all_single_letters() {
        let letters: String = (0..26).map(answer_letter).collect();
        assert_eq!(letters, "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    }

    #[test]
    fn test_question_label_marker_appears_once() {
        assert_eq!(question_label(1, false), "Question 1:");
        let wrong = question_label(3, true);
        assert_eq!(wrong, "Question 3: [WRONG ANSWER]");
        assert_eq!(wrong.matches(WRONG_ANSWER_MARKER).count(), 1);
    }

    #[test]
    fn test_answer_and_summary_lines() {
        assert_eq!(answer_line(1, "Manila"), "B. Manila");
        assert_eq!(total_line(0), "Total Questions: 0");
        assert_eq!(incorrect_line(1), "Incorrect Answers: 1");
    }
}
