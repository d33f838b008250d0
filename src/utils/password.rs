use rpassword::prompt_password;

/// Prompts twice with no echo and returns the confirmed password.
pub fn read_new_password() -> Result<String, Box<dyn std::error::Error>> {
    let first = prompt_password("Enter new root password: ")?;
    let second = prompt_password("Confirm new root password: ")?;
    confirm_pair(first, second)
}

fn confirm_pair(first: String, second: String) -> Result<String, Box<dyn std::error::Error>> {
    if first != second {
        return Err("Password entries do not match".into());
    }
    if first.is_empty() {
        return Err("Empty password not allowed".into());
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_pair_is_accepted() {
        let password = confirm_pair(String::from("hunter2"), String::from("hunter2")).unwrap();
        assert_eq!(password, "hunter2");
    }

    #[test]
    fn mismatched_pair_is_rejected() {
        let err = confirm_pair(String::from("hunter2"), String::from("hunter3")).unwrap_err();
        assert!(err.to_string().contains("do not match"));
    }

    #[test]
    fn empty_pair_is_rejected() {
        assert!(confirm_pair(String::new(), String::new()).is_err());
    }
}
