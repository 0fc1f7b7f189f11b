#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use taskdeck::libs::form::{
        validate_email, validate_password, AuthForm, AuthMode, EditForm, TaskForm, ValidationError, MIN_PASSWORD_LEN,
    };
    use taskdeck::libs::task::Task;

    #[test]
    fn test_email_validation() {
        assert_eq!(validate_email(""), Err(ValidationError::EmailRequired));
        assert_eq!(validate_email("foo"), Err(ValidationError::EmailInvalid));
        assert_eq!(validate_email("foo@bar.com"), Ok(()));
    }

    #[test]
    fn test_password_length_only_checked_on_sign_up() {
        assert_eq!(validate_password("12345", AuthMode::SignIn), Ok(()));
        assert_eq!(
            validate_password("12345", AuthMode::SignUp),
            Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN))
        );
        assert_eq!(validate_password("123456", AuthMode::SignUp), Ok(()));
        assert_eq!(validate_password("", AuthMode::SignIn), Err(ValidationError::PasswordRequired));
    }

    #[test]
    fn test_auth_form_reports_field_errors() {
        let mut form = AuthForm::new(AuthMode::SignUp);
        form.set_email("foo");
        form.set_password("12345");

        assert!(!form.validate());
        assert_eq!(form.errors().email, Some(ValidationError::EmailInvalid));
        assert_eq!(form.errors().password, Some(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN)));
        assert_eq!(
            form.errors().password.as_ref().map(|e| e.to_string()).as_deref(),
            Some("Password must be at least 6 characters long")
        );
    }

    #[test]
    fn test_editing_a_field_clears_only_its_error() {
        let mut form = AuthForm::new(AuthMode::SignIn);
        assert!(!form.validate());
        assert_eq!(form.errors().email, Some(ValidationError::EmailRequired));

        form.set_email("foo@bar.com");
        assert_eq!(form.errors().email, None);
        assert_eq!(form.errors().password, Some(ValidationError::PasswordRequired));

        form.set_password("secret");
        assert!(form.errors().is_empty());
        assert!(form.validate());
    }

    #[test]
    fn test_toggle_mode_clears_errors() {
        let mut form = AuthForm::new(AuthMode::SignIn);
        form.set_email("foo@bar.com");
        form.set_password("12345");
        assert!(form.validate());

        form.toggle_mode();
        assert_eq!(form.mode(), AuthMode::SignUp);
        assert!(!form.validate());

        form.toggle_mode();
        assert_eq!(form.mode(), AuthMode::SignIn);
        assert!(form.errors().is_empty());
        assert_eq!(form.email(), "foo@bar.com");
    }

    #[test]
    fn test_task_form_blocks_blank_title() {
        let mut form = TaskForm {
            title: "   ".to_string(),
            description: "notes".to_string(),
            due_date: "2024-01-02".to_string(),
        };

        assert!(!form.can_submit());
        assert_eq!(form.submit(), None);
        assert_eq!(form.description, "notes");
    }

    #[test]
    fn test_task_form_resets_after_submit() {
        let mut form = TaskForm {
            title: "Buy milk".to_string(),
            description: String::new(),
            due_date: "2024-01-02".to_string(),
        };

        let input = form.submit().unwrap();
        assert_eq!(input.title, "Buy milk");
        assert_eq!(input.due_date, "2024-01-02");
        assert!(form.title.is_empty());
        assert!(form.due_date.is_empty());
    }

    #[test]
    fn test_edit_form_prefills_from_task() {
        let task = Task {
            id: "42".to_string(),
            user_id: "u1".to_string(),
            title: "Call Bob".to_string(),
            description: "About the lease".to_string(),
            completed: false,
            due_date: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
        };

        let mut form = EditForm::from_task(&task);
        assert_eq!(form.id, "42");
        assert_eq!(form.title, "Call Bob");
        assert_eq!(form.due_date, "2024-06-01");

        form.title.clear();
        assert!(!form.can_save());
        assert_eq!(form.save(), None);

        form.title = "Call Bob again".to_string();
        assert_eq!(form.save().map(|input| input.title).as_deref(), Some("Call Bob again"));
    }
}
