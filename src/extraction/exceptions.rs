use super::patterns::THROWN_TYPE;

/// First thrown-type token in `body`, by source position.
///
/// Recognises `isInstanceOf(X.class)`, `thenThrow(new X(...))`,
/// `doThrow(new X(...))` and `assertThrows(X.class, ...)`.
pub fn find_exception_type(body: &str) -> Option<String> {
    let captures = THROWN_TYPE.captures(body)?;
    (1..=3)
        .find_map(|group| captures.get(group))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins() {
        let body = "when(repo.find(1)).thenThrow(new NotFoundException(\"x\"));\n\
                    assertThatThrownBy(() -> svc.get(1)).isInstanceOf(ServiceException.class);";
        assert_eq!(find_exception_type(body), Some("NotFoundException".into()));
    }

    #[test]
    fn test_instance_of_without_class_suffix() {
        assert_eq!(
            find_exception_type(".isInstanceOf(IllegalArgumentException)"),
            Some("IllegalArgumentException".into())
        );
    }

    #[test]
    fn test_no_thrown_type() {
        assert_eq!(find_exception_type("assertThatThrownBy(() -> run());"), None);
    }
}
