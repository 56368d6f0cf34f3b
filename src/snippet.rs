/// The practice text.
pub const SNIPPET: &str = "def two_sum(nums, target):
    num_map = {}

    for i, num in enumerate(nums):
        complement = target - num

        if complement in num_map:
            return [num_map[complement], i]

        num_map[num] = i

    return []";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::text::SnippetText;

    #[test]
    fn test_snippet_shape() {
        let text = SnippetText::new(SNIPPET);
        assert_eq!(text.lines.len(), 12);
        assert!(text.lines[2].is_blank());
        assert_eq!(text.first_position(), Some((0, 0)));
        assert_eq!(text.last_position(), Some((11, 5)));
    }
}
