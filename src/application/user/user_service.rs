use crate::domain::{self, NewUser, UserId, commands::*};
use crate::ports::UserWriteOutcome;

use crate::application::dependencies::{ServiceDependencies, load_user};
use crate::application::errors::{ApplicationError, Result};
use crate::application::views::UserView;

/// ユーザーを登録する
///
/// ビジネスルール：メールアドレスはユーザー間で一意（DuplicateEmail）。
/// 事前確認の後に他の登録が確定した場合も、保存時の一意制約で DuplicateEmail になる。
pub async fn create_user(deps: &ServiceDependencies, cmd: CreateUser) -> Result<UserView> {
    let taken = deps
        .users
        .exists_by_email(&cmd.email)
        .await
        .map_err(ApplicationError::Repository)?;

    if taken {
        return Err(ApplicationError::DuplicateEmail(cmd.email));
    }

    let outcome = deps
        .users
        .insert(NewUser {
            name: cmd.name,
            email: cmd.email.clone(),
        })
        .await
        .map_err(ApplicationError::Repository)?;

    let user = match outcome {
        UserWriteOutcome::Saved(user) => user,
        UserWriteOutcome::DuplicateEmail => {
            return Err(ApplicationError::DuplicateEmail(cmd.email));
        }
    };

    tracing::info!(user_id = %user.user_id, "User created");
    Ok(UserView::from(&user))
}

/// ユーザーを部分更新する
///
/// 新しいメールアドレスが他のユーザーのものであれば DuplicateEmail。
/// 自分の現在のアドレスの再指定は許可する。
pub async fn update_user(deps: &ServiceDependencies, cmd: UpdateUser) -> Result<UserView> {
    let user = load_user(deps, cmd.user_id).await?;

    if let Some(email) = cmd.email.as_deref() {
        if email != user.email {
            let taken = deps
                .users
                .exists_by_email(email)
                .await
                .map_err(ApplicationError::Repository)?;
            if taken {
                return Err(ApplicationError::DuplicateEmail(email.to_string()));
            }
        }
    }

    let updated = domain::apply_user_update(user, cmd.name, cmd.email);
    let outcome = deps
        .users
        .update(&updated)
        .await
        .map_err(ApplicationError::Repository)?;

    if outcome == UserWriteOutcome::DuplicateEmail {
        return Err(ApplicationError::DuplicateEmail(updated.email));
    }

    tracing::info!(user_id = %updated.user_id, "User updated");
    Ok(UserView::from(&updated))
}

pub async fn get_user(deps: &ServiceDependencies, user_id: UserId) -> Result<UserView> {
    let user = load_user(deps, user_id).await?;
    Ok(UserView::from(&user))
}

pub async fn list_users(deps: &ServiceDependencies) -> Result<Vec<UserView>> {
    let users = deps
        .users
        .find_all()
        .await
        .map_err(ApplicationError::Repository)?;
    Ok(users.iter().map(UserView::from).collect())
}

/// ユーザーを削除する
///
/// 所有アイテム、予約、コメント、リクエストも合わせて削除される。
pub async fn delete_user(deps: &ServiceDependencies, user_id: UserId) -> Result<()> {
    let deleted = deps
        .users
        .delete(user_id)
        .await
        .map_err(ApplicationError::Repository)?;

    if !deleted {
        return Err(ApplicationError::UserNotFound(user_id));
    }

    tracing::info!(user_id = %user_id, "User deleted");
    Ok(())
}
