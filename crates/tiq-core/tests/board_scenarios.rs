//! End-to-end board scenarios: bulk load, change-event interleaving,
//! and filtered views over the resulting collection.

use chrono::{Duration, Utc};
use tiq_core::{
    Category, ChangeEvent, Filter, FilterState, Sentiment, StoreError, Subscription, Ticket,
    TicketBoard, TicketStore, filter,
};

struct FixedStore(Result<Vec<Ticket>, StoreError>);

impl TicketStore for FixedStore {
    fn fetch_all(&self) -> Result<Vec<Ticket>, StoreError> {
        self.0.clone()
    }
}

fn ticket(id: &str, description: &str, hours_ago: i64) -> Ticket {
    Ticket {
        id: id.into(),
        description: description.into(),
        category: None,
        sentiment: None,
        processed: false,
        created_at: Utc::now() - Duration::hours(hours_ago),
    }
}

#[test]
fn load_then_negative_filter_selects_the_one_negative_ticket() {
    let mut angry = ticket("t1", "Mi factura está incorrecta", 1);
    angry.sentiment = Some(Sentiment::Negative);
    angry.category = Some(Category::Billing);
    let happy = ticket("t2", "Excelente servicio", 2);
    let neutral = ticket("t3", "Consulta sobre planes", 3);

    let mut board = TicketBoard::new();
    board
        .load(&FixedStore(Ok(vec![angry, happy, neutral])))
        .expect("load should succeed");
    assert_eq!(board.tickets().len(), 3);

    let view = filter::apply(board.tickets(), &FilterState::tab(Filter::Negative));
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].id, "t1");
}

#[test]
fn events_stream_through_a_subscription_into_the_board() {
    let mut board = TicketBoard::new();
    board
        .load(&FixedStore(Ok(vec![ticket("t1", "primero", 2)])))
        .expect("load should succeed");

    let (feed, sub) = Subscription::channel();
    assert!(feed.publish(ChangeEvent::Inserted(ticket("t2", "segundo", 1))));
    let mut processed = ticket("t1", "primero", 2);
    processed.processed = true;
    processed.sentiment = Some(Sentiment::Neutral);
    assert!(feed.publish(ChangeEvent::Updated(processed)));
    assert!(feed.publish(ChangeEvent::Deleted("t2".into())));

    while let Some(event) = sub.try_next() {
        board.apply(event);
    }

    let ids: Vec<&str> = board.tickets().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["t1"]);
    assert!(board.tickets()[0].processed);
}

#[test]
fn update_racing_a_slow_fetch_is_dropped_until_the_next_load() {
    let mut board = TicketBoard::new();

    // The realtime update lands before the initial fetch delivered the row.
    let mut early = ticket("t1", "llegó antes del fetch", 1);
    early.processed = true;
    board.apply(ChangeEvent::Updated(early));
    assert!(board.tickets().is_empty());

    // The next full load recovers the authoritative row state.
    let mut authoritative = ticket("t1", "llegó antes del fetch", 1);
    authoritative.processed = true;
    board
        .load(&FixedStore(Ok(vec![authoritative])))
        .expect("load should succeed");
    assert_eq!(board.tickets().len(), 1);
    assert!(board.tickets()[0].processed);
}

#[test]
fn insert_event_racing_the_fetch_does_not_duplicate_the_row() {
    let seeded = ticket("t1", "ya estaba en el fetch", 1);

    let mut board = TicketBoard::new();
    board
        .load(&FixedStore(Ok(vec![seeded.clone()])))
        .expect("load should succeed");
    board.apply(ChangeEvent::Inserted(seeded));

    assert_eq!(board.tickets().len(), 1);
}

#[test]
fn failed_load_blocks_display_but_later_retry_recovers() {
    let mut board = TicketBoard::new();
    let _ = board.load(&FixedStore(Err(StoreError::Request(
        "connection refused".into(),
    ))));
    assert!(board.load_error().is_some());
    assert!(board.tickets().is_empty());

    board
        .load(&FixedStore(Ok(vec![ticket("t1", "de vuelta", 1)])))
        .expect("retry should succeed");
    assert!(board.load_error().is_none());
    assert_eq!(board.tickets().len(), 1);
}

#[test]
fn stats_and_counts_agree_over_the_board() {
    let now = Utc::now();
    let mut done = ticket("t1", "resuelto", 1);
    done.processed = true;
    done.sentiment = Some(Sentiment::Positive);
    let mut bad = ticket("t2", "queja", 2);
    bad.sentiment = Some(Sentiment::Negative);

    let mut board = TicketBoard::new();
    board
        .load(&FixedStore(Ok(vec![done, bad, ticket("t3", "abierto", 3)])))
        .expect("load should succeed");

    let stats = board.stats(now);
    let counts = board.filter_counts();
    assert_eq!(stats.total, counts.all);
    assert_eq!(stats.pending, counts.pending);
    assert_eq!(stats.processed, counts.processed);
    assert_eq!(stats.positive, counts.positive);
    assert_eq!(stats.negative, counts.negative);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.pending, 2);
}
