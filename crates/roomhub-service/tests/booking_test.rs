//! Booking engine tests over the in-memory store.

mod common;

use std::sync::Arc;

use uuid::Uuid;

use common::{MemoryBookingStore, at, make_room};
use roomhub_core::error::ErrorKind;
use roomhub_entity::booking::{BookingStatus, NewBooking};
use roomhub_service::booking::BookingService;

fn proposal(room_id: Uuid, start: (u32, u32), end: (u32, u32)) -> NewBooking {
    NewBooking {
        user_id: Uuid::new_v4(),
        room_id,
        start_time: at(start.0, start.1),
        end_time: at(end.0, end.1),
        note: String::new(),
    }
}

fn service_with_room(room_id: Uuid) -> BookingService {
    BookingService::new(Arc::new(MemoryBookingStore::with_room(make_room(room_id))))
}

#[tokio::test]
async fn propose_creates_a_pending_booking() {
    let room_id = Uuid::new_v4();
    let service = service_with_room(room_id);

    let booking = service.propose(proposal(room_id, (10, 0), (11, 0))).await.unwrap();
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.room_id, room_id);
}

#[tokio::test]
async fn contained_interval_conflicts() {
    let room_id = Uuid::new_v4();
    let service = service_with_room(room_id);

    service.propose(proposal(room_id, (10, 0), (11, 0))).await.unwrap();
    let err = service
        .propose(proposal(room_id, (10, 30), (10, 45)))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn exact_duplicate_conflicts() {
    let room_id = Uuid::new_v4();
    let service = service_with_room(room_id);

    service.propose(proposal(room_id, (10, 0), (11, 0))).await.unwrap();
    let err = service
        .propose(proposal(room_id, (10, 0), (11, 0)))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn touching_intervals_conflict() {
    let room_id = Uuid::new_v4();
    let service = service_with_room(room_id);

    service.propose(proposal(room_id, (10, 0), (11, 0))).await.unwrap();
    let err = service
        .propose(proposal(room_id, (11, 0), (12, 0)))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn disjoint_intervals_coexist() {
    let room_id = Uuid::new_v4();
    let service = service_with_room(room_id);

    service.propose(proposal(room_id, (10, 0), (11, 0))).await.unwrap();
    service.propose(proposal(room_id, (12, 0), (13, 0))).await.unwrap();
}

#[tokio::test]
async fn other_rooms_are_unaffected() {
    let room_a = Uuid::new_v4();
    let room_b = Uuid::new_v4();
    let store = MemoryBookingStore::default();
    store.rooms.lock().unwrap().insert(room_a, make_room(room_a));
    store.rooms.lock().unwrap().insert(room_b, make_room(room_b));
    let service = BookingService::new(Arc::new(store));

    service.propose(proposal(room_a, (10, 0), (11, 0))).await.unwrap();
    service.propose(proposal(room_b, (10, 0), (11, 0))).await.unwrap();
}

#[tokio::test]
async fn unknown_room_is_rejected() {
    let service = service_with_room(Uuid::new_v4());

    let err = service
        .propose(proposal(Uuid::new_v4(), (10, 0), (11, 0)))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::RoomNotFound);
}

#[tokio::test]
async fn inverted_interval_is_rejected() {
    let room_id = Uuid::new_v4();
    let service = service_with_room(room_id);

    let err = service
        .propose(proposal(room_id, (11, 0), (10, 0)))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = service
        .propose(proposal(room_id, (10, 0), (10, 0)))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn released_booking_frees_its_interval() {
    let room_id = Uuid::new_v4();
    let service = service_with_room(room_id);

    let booking = service.propose(proposal(room_id, (10, 0), (11, 0))).await.unwrap();
    service.release(booking.id).await.unwrap();

    service.propose(proposal(room_id, (10, 0), (11, 0))).await.unwrap();
}

#[tokio::test]
async fn rejected_booking_frees_its_interval() {
    let room_id = Uuid::new_v4();
    let service = service_with_room(room_id);

    let booking = service.propose(proposal(room_id, (10, 0), (11, 0))).await.unwrap();
    service.reject(booking.id).await.unwrap();

    service.propose(proposal(room_id, (10, 0), (11, 0))).await.unwrap();
}

#[tokio::test]
async fn approved_booking_still_blocks() {
    let room_id = Uuid::new_v4();
    let service = service_with_room(room_id);

    let booking = service.propose(proposal(room_id, (10, 0), (11, 0))).await.unwrap();
    service.approve(booking.id).await.unwrap();

    let err = service
        .propose(proposal(room_id, (10, 30), (11, 30)))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn approve_then_release_is_legal() {
    let room_id = Uuid::new_v4();
    let service = service_with_room(room_id);

    let booking = service.propose(proposal(room_id, (10, 0), (11, 0))).await.unwrap();
    let approved = service.approve(booking.id).await.unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);

    let released = service.release(booking.id).await.unwrap();
    assert_eq!(released.status, BookingStatus::Released);
}

#[tokio::test]
async fn approved_booking_cannot_be_rejected() {
    let room_id = Uuid::new_v4();
    let service = service_with_room(room_id);

    let booking = service.propose(proposal(room_id, (10, 0), (11, 0))).await.unwrap();
    service.approve(booking.id).await.unwrap();

    let err = service.reject(booking.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::IllegalTransition);
}

#[tokio::test]
async fn terminal_statuses_refuse_all_transitions() {
    let room_id = Uuid::new_v4();
    let service = service_with_room(room_id);

    let booking = service.propose(proposal(room_id, (10, 0), (11, 0))).await.unwrap();
    service.release(booking.id).await.unwrap();

    for result in [
        service.approve(booking.id).await,
        service.reject(booking.id).await,
        service.release(booking.id).await,
    ] {
        assert_eq!(result.unwrap_err().kind, ErrorKind::IllegalTransition);
    }
}

#[tokio::test]
async fn transition_on_unknown_booking_is_not_found() {
    let service = service_with_room(Uuid::new_v4());
    let err = service.approve(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn concurrent_proposals_admit_exactly_one() {
    let room_id = Uuid::new_v4();
    let service = service_with_room(room_id);

    // The store yields between the overlap check and the insert, so without
    // the per-room lock both proposals would pass the check.
    let first = service.propose(proposal(room_id, (10, 0), (11, 0)));
    let second = service.propose(proposal(room_id, (10, 30), (11, 30)));
    let (a, b) = tokio::join!(first, second);

    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one proposal must win");
    let conflict = if a.is_err() { a } else { b };
    assert_eq!(conflict.unwrap_err().kind, ErrorKind::Conflict);
}
