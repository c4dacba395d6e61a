use serde::{Deserialize, Serialize};

use super::UserId;

/// ユーザー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    /// ユーザー間で一意
    pub email: String,
}

/// 未保存のユーザー（IDはストアが採番）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl NewUser {
    pub fn persisted(self, user_id: UserId) -> User {
        User {
            user_id,
            name: self.name,
            email: self.email,
        }
    }
}

/// 純粋関数：部分更新を適用する
///
/// 指定されたフィールドのみ置き換える。
pub fn apply_user_update(user: User, name: Option<String>, email: Option<String>) -> User {
    User {
        name: name.unwrap_or(user.name),
        email: email.unwrap_or(user.email),
        ..user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            user_id: UserId::new(1),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    #[test]
    fn test_apply_user_update_replaces_only_given_fields() {
        let updated = apply_user_update(sample_user(), Some("Alicia".to_string()), None);
        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.email, "alice@example.com");

        let updated = apply_user_update(updated, None, Some("a@example.org".to_string()));
        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.email, "a@example.org");
        assert_eq!(updated.user_id, UserId::new(1));
    }
}
