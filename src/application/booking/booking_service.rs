use crate::domain::{self, BookingId, UserId, access, commands::*};
use crate::ports::{BookingInsertOutcome, DecisionOutcome};

use crate::application::dependencies::{ServiceDependencies, load_booking, load_item, load_user};
use crate::application::errors::{ApplicationError, Result};
use crate::application::views::BookingView;

/// 予約を申し込む
///
/// ビジネスルール（この順で検証する）：
/// - 借り手が存在すること（UserNotFound）
/// - アイテムが存在すること（ItemNotFound）
/// - アイテムが貸出可能であること（ItemNotAvailable）
/// - 所有者自身の予約ではないこと（OwnItemBooking）
/// - 開始が終了より前であること（InvalidBookingWindow）
///
/// 他の予約との重複は検証しない。作成された予約は常に WAITING。
/// 貸出可否は保存時にリポジトリが作業単位の中で再確認する。
pub async fn create_booking(deps: &ServiceDependencies, cmd: CreateBooking) -> Result<BookingView> {
    // 1. 借り手とアイテムの解決
    let booker = load_user(deps, cmd.booker_id).await?;
    let item = load_item(deps, cmd.item_id).await?;

    // 2. ドメイン層の純粋関数を呼び出し
    let new_booking =
        domain::request_booking(&booker, &item, cmd.start, cmd.end).map_err(|e| {
            tracing::warn!(
                booker_id = %cmd.booker_id,
                item_id = %cmd.item_id,
                "Booking request rejected: {:?}",
                e
            );
            ApplicationError::from_request_booking(e, cmd.item_id)
        })?;

    // 3. 作業単位で保存
    let outcome = deps
        .bookings
        .insert(&new_booking)
        .await
        .map_err(ApplicationError::Repository)?;

    let booking_id = match outcome {
        BookingInsertOutcome::Inserted(booking_id) => booking_id,
        BookingInsertOutcome::ItemUnavailable => {
            // 読み取りから書き込みまでの間に承認が確定した
            tracing::warn!(
                booker_id = %cmd.booker_id,
                item_id = %cmd.item_id,
                "Booking request rejected: item became unavailable"
            );
            return Err(ApplicationError::ItemNotAvailable(cmd.item_id));
        }
    };

    let booking = new_booking.persisted(booking_id);
    tracing::info!(
        booking_id = %booking_id,
        booker_id = %cmd.booker_id,
        item_id = %cmd.item_id,
        "Booking created"
    );

    Ok(BookingView::from(&booking))
}

/// 予約に回答する（承認・却下）
///
/// ビジネスルール：
/// - 回答者が存在すること（UserNotFound）
/// - 予約が存在すること（BookingNotFound）
/// - 回答者がアイテムの所有者であること（NotItemOwner）
/// - 予約が WAITING であること（BookingAlreadyDecided）
/// - 承認時：同じアイテムの承認済み予約と重ならないこと（OverlapsApprovedBooking）
///
/// 承認するとアイテムは貸出不可になる。却下ではアイテムの状態は変わらない。
/// ステータスとアイテムの書き込みはリポジトリが1つの作業単位で行う。
pub async fn respond_to_booking(
    deps: &ServiceDependencies,
    cmd: RespondToBooking,
) -> Result<BookingView> {
    // 1. 回答者と予約の解決（失敗時は権限判定の前に終了する）
    load_user(deps, cmd.user_id).await?;
    let booking = load_booking(deps, cmd.booking_id).await?;

    // 2. 所有者であることの確認
    if !access::is_item_owner(cmd.user_id, &booking) {
        tracing::warn!(
            user_id = %cmd.user_id,
            booking_id = %cmd.booking_id,
            "Only the item owner may respond to a booking"
        );
        return Err(ApplicationError::NotItemOwner(
            cmd.user_id,
            booking.item.item_id,
        ));
    }

    // 3. ドメイン層の純粋関数で状態遷移
    let decided = domain::respond_to_booking(booking, cmd.approved)
        .map_err(|e| ApplicationError::from_respond_booking(e, cmd.booking_id))?;

    // 4. 作業単位で書き込み
    let outcome = deps
        .bookings
        .apply_decision(&decided)
        .await
        .map_err(ApplicationError::Repository)?;

    match outcome {
        DecisionOutcome::Applied => {}
        DecisionOutcome::AlreadyDecided => {
            // 読み取りから書き込みまでの間に他の回答が確定した
            let current = load_booking(deps, cmd.booking_id).await?;
            return Err(ApplicationError::BookingAlreadyDecided(
                cmd.booking_id,
                current.status,
            ));
        }
        DecisionOutcome::OverlapsApproved => {
            tracing::warn!(
                booking_id = %cmd.booking_id,
                "Approval refused: overlaps an approved booking"
            );
            return Err(ApplicationError::OverlapsApprovedBooking(cmd.booking_id));
        }
    }

    if cmd.approved {
        tracing::info!(
            booking_id = %cmd.booking_id,
            owner_id = %cmd.user_id,
            item_id = %decided.item.item_id,
            "Booking approved"
        );
    } else {
        tracing::info!(
            booking_id = %cmd.booking_id,
            owner_id = %cmd.user_id,
            "Booking rejected"
        );
    }

    Ok(BookingView::from(&decided))
}

/// IDで予約を取得する
///
/// 閲覧できるのは借り手とアイテムの所有者のみ（NotBookingParticipant）。
pub async fn get_booking_by_id(
    deps: &ServiceDependencies,
    viewer_id: UserId,
    booking_id: BookingId,
) -> Result<BookingView> {
    let booking = load_booking(deps, booking_id).await?;

    if !access::can_access_booking(viewer_id, &booking) {
        return Err(ApplicationError::NotBookingParticipant(
            viewer_id, booking_id,
        ));
    }

    tracing::debug!(booking_id = %booking_id, viewer_id = %viewer_id, "Booking fetched");
    Ok(BookingView::from(&booking))
}
