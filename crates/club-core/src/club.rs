//! The club state machine.
//!
//! [`ClubState`] consumes one event at a time, in chronological order, and
//! keeps everything that changes during the day: who is inside, who sits
//! where, who is waiting, what each table has earned, and the trace of every
//! event seen or produced.
//!
//! # Replay Summary
//!
//! 1. Every input event is echoed into the trace before it is handled.
//! 2. The handler for its kind checks its own preconditions; a violation is
//!    logged as an error event and the replay moves on.
//! 3. [`ClubState::end_of_day`] checks out everyone still inside, in name
//!    order, at closing time.

use std::collections::{BTreeMap, VecDeque};

use crate::config::ClubConfig;
use crate::error::ClubError;
use crate::event::{Event, EventKind};
use crate::report::DayReport;
use crate::table::Table;
use crate::time::TimeOfDay;
use crate::types::{ClientName, TableNumber};

/// Where a present client is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seat {
    /// Inside the club without a table, possibly in the queue.
    Unseated,
    At(TableNumber),
}

/// A decoded input event, ready for its handler.
#[derive(Debug)]
enum Request {
    Arrive(ClientName),
    Sit(ClientName, i64),
    Wait(ClientName),
    Leave(ClientName),
}

impl Request {
    /// Pulls the fields a handler needs out of the event body.
    fn decode(kind: EventKind, body: &str) -> Result<Self, ClubError> {
        let mut tokens = body.split_whitespace();
        let client = tokens
            .next()
            .and_then(|name| ClientName::new(name).ok())
            .ok_or(ClubError::MalformedEvent);

        let request = match kind {
            EventKind::ClientArrived => Self::Arrive(client?),
            EventKind::ClientSat => {
                let client = client?;
                let table = tokens
                    .next()
                    .and_then(|t| t.parse().ok())
                    .ok_or(ClubError::MalformedEvent)?;
                Self::Sit(client, table)
            }
            EventKind::ClientWaiting => Self::Wait(client?),
            EventKind::ClientLeft => Self::Leave(client?),
            EventKind::ClientForcedOut
            | EventKind::ClientPromoted
            | EventKind::Error
            | EventKind::Unrecognized(_) => return Err(ClubError::UnknownEventType),
        };

        if tokens.next().is_some() {
            return Err(ClubError::MalformedEvent);
        }
        Ok(request)
    }
}

/// Club-wide state for one day.
#[derive(Debug, Clone)]
pub struct ClubState {
    config: ClubConfig,
    tables: Vec<Table>,
    clients: BTreeMap<ClientName, Seat>,
    queue: VecDeque<ClientName>,
    log: Vec<Event>,
}

impl ClubState {
    pub fn new(config: ClubConfig) -> Self {
        let tables = (0..config.tables()).map(|_| Table::default()).collect();
        Self {
            config,
            tables,
            clients: BTreeMap::new(),
            queue: VecDeque::new(),
            log: Vec::new(),
        }
    }

    pub const fn config(&self) -> &ClubConfig {
        &self.config
    }

    /// Tables in number order.
    pub fn tables(&self) -> impl Iterator<Item = (TableNumber, &Table)> {
        self.tables.iter().enumerate().filter_map(|(i, table)| {
            let number = u32::try_from(i + 1).ok()?;
            Some((TableNumber::new(number).ok()?, table))
        })
    }

    pub fn table(&self, number: TableNumber) -> Option<&Table> {
        self.tables.get(number.index())
    }

    /// Where `client` is, or `None` if they are not inside.
    pub fn seat_of(&self, client: &ClientName) -> Option<Seat> {
        self.clients.get(client).copied()
    }

    /// Clients inside the club, in name order.
    pub fn clients(&self) -> impl Iterator<Item = (&ClientName, Seat)> {
        self.clients.iter().map(|(name, seat)| (name, *seat))
    }

    /// Waiting clients, head first.
    pub fn queue(&self) -> impl Iterator<Item = &ClientName> {
        self.queue.iter()
    }

    /// Everything emitted so far, in emission order.
    pub fn log(&self) -> &[Event] {
        &self.log
    }

    /// Applies one input event.
    ///
    /// The event is echoed to the log first. Rejections are logged as error
    /// events and never stop the replay.
    pub fn process_event(&mut self, event: Event) {
        let (time, kind) = (event.time, event.kind);
        let request = Request::decode(kind, &event.body);
        self.log.push(event);

        let outcome = request.and_then(|request| match request {
            Request::Arrive(client) => self.arrive(time, client),
            Request::Sit(client, number) => {
                let table = self
                    .config
                    .table(number)
                    .ok_or(ClubError::InvalidTableNumber)?;
                self.sit(time, client, table)
            }
            Request::Wait(client) => self.wait(time, client),
            Request::Leave(client) => self.leave(time, &client),
        });

        if let Err(error) = outcome {
            tracing::debug!(%time, code = kind.code(), %error, "event rejected");
            self.log.push(Event::error(time, &error));
        }
    }

    /// Closes the day: everyone still inside is checked out at closing time,
    /// in name order. Calling it again does nothing.
    pub fn end_of_day(&mut self) {
        let close = self.config.close();
        let remaining = std::mem::take(&mut self.clients);
        self.queue.clear();

        for (client, seat) in remaining {
            self.log.push(Event::forced_out(close, &client));
            if let Seat::At(table) = seat {
                self.release(table, close);
            }
            tracing::debug!(%client, "checked out at closing");
        }
    }

    /// Read view of the day for rendering.
    pub fn report(&self) -> DayReport<'_> {
        DayReport::new(self)
    }

    fn arrive(&mut self, time: TimeOfDay, client: ClientName) -> Result<(), ClubError> {
        if !self.config.is_open_at(time) {
            return Err(ClubError::NotOpenYet);
        }
        if self.clients.contains_key(&client) {
            return Err(ClubError::YouShallNotPass);
        }
        tracing::debug!(%time, %client, "client arrived");
        self.clients.insert(client, Seat::Unseated);
        Ok(())
    }

    fn sit(
        &mut self,
        time: TimeOfDay,
        client: ClientName,
        table: TableNumber,
    ) -> Result<(), ClubError> {
        let seat = self.seat_of(&client).ok_or(ClubError::ClientUnknown)?;
        if self.tables[table.index()].is_occupied() {
            return Err(ClubError::PlaceIsBusy);
        }
        if let Seat::At(previous) = seat {
            self.release(previous, time);
        }
        self.queue.retain(|waiting| waiting != &client);
        self.seat(time, client, table);
        Ok(())
    }

    fn wait(&mut self, time: TimeOfDay, client: ClientName) -> Result<(), ClubError> {
        match self.seat_of(&client) {
            None => return Err(ClubError::ClientUnknown),
            Some(Seat::At(_)) => return Err(ClubError::ClientAlreadySeated),
            Some(Seat::Unseated) => {}
        }
        if self.free_table().is_some() {
            return Err(ClubError::ICanWaitNoLonger);
        }
        if self.queue.contains(&client) {
            return Ok(());
        }

        if self.queue.len() >= self.tables.len() {
            tracing::debug!(%time, %client, "queue full, client sent away");
            self.clients.remove(&client);
            self.log.push(Event::forced_out(time, &client));
        } else {
            tracing::debug!(%time, %client, position = self.queue.len() + 1, "client queued");
            self.queue.push_back(client);
        }
        Ok(())
    }

    fn leave(&mut self, time: TimeOfDay, client: &ClientName) -> Result<(), ClubError> {
        let seat = self.clients.remove(client).ok_or(ClubError::ClientUnknown)?;
        if let Seat::At(table) = seat {
            self.release(table, time);
        }
        self.queue.retain(|waiting| waiting != client);
        tracing::debug!(%time, %client, "client left");

        let Some(table) = self.free_table() else {
            return Ok(());
        };
        if let Some(next) = self.queue.pop_front() {
            self.log.push(Event::promoted(time, &next, table));
            self.seat(time, next, table);
        }
        Ok(())
    }

    fn seat(&mut self, time: TimeOfDay, client: ClientName, table: TableNumber) {
        tracing::debug!(%time, %client, %table, "client seated");
        self.clients.insert(client.clone(), Seat::At(table));
        self.tables[table.index()].seat(client, time);
    }

    fn release(&mut self, table: TableNumber, time: TimeOfDay) {
        let rate = self.config.hourly_rate();
        if let Some(charge) = self.tables[table.index()].release(time, rate) {
            tracing::debug!(
                %time,
                %table,
                elapsed = %charge.elapsed,
                amount = charge.amount,
                "table released"
            );
        }
    }

    /// Lowest-numbered free table.
    fn free_table(&self) -> Option<TableNumber> {
        self.tables()
            .find(|(_, table)| !table.is_occupied())
            .map(|(number, _)| number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        s.parse().expect("valid test time")
    }

    fn name(s: &str) -> ClientName {
        ClientName::new(s).expect("valid test name")
    }

    fn table(n: u32) -> TableNumber {
        TableNumber::new(n).expect("valid test table")
    }

    fn club(tables: u32) -> ClubState {
        let config = ClubConfig::new(tables, t("09:00"), t("19:00"), 10).expect("valid config");
        ClubState::new(config)
    }

    /// Feeds `HH:MM code body` lines into the club.
    fn feed(club: &mut ClubState, lines: &[&str]) {
        for line in lines {
            let (time, rest) = line.split_once(' ').expect("time");
            let (code, body) = rest.split_once(' ').unwrap_or((rest, ""));
            let kind = EventKind::from_code(code.parse().expect("code"));
            club.process_event(Event::new(t(time), kind, body));
            assert_consistent(club);
        }
    }

    fn trace(club: &ClubState) -> Vec<String> {
        club.log().iter().map(ToString::to_string).collect()
    }

    /// Checks the cross-collection invariants after every step.
    fn assert_consistent(club: &ClubState) {
        for (number, table) in club.tables() {
            let holders: Vec<_> = club
                .clients()
                .filter(|(_, seat)| *seat == Seat::At(number))
                .map(|(client, _)| client)
                .collect();
            assert_eq!(
                table.is_occupied(),
                holders.len() == 1,
                "table {number} occupancy disagrees with registry"
            );
            assert!(holders.len() <= 1, "table {number} has several holders");
            if let Some(&holder) = holders.first() {
                assert_eq!(table.occupant(), Some(holder));
            }
        }

        assert!(club.queue().count() <= club.tables.len(), "queue over capacity");
        for waiting in club.queue() {
            assert_eq!(club.seat_of(waiting), Some(Seat::Unseated));
        }

        for pair in club.log().windows(2) {
            assert!(pair[0].time <= pair[1].time, "log out of order");
        }
    }

    #[test]
    fn arrival_at_opening_succeeds_and_at_closing_fails() {
        let mut club = club(1);
        feed(&mut club, &["09:00 1 early", "19:00 1 late"]);

        assert_eq!(club.seat_of(&name("early")), Some(Seat::Unseated));
        assert_eq!(club.seat_of(&name("late")), None);
        assert_eq!(
            trace(&club),
            ["09:00 1 early", "19:00 1 late", "19:00 13 NotOpenYet"]
        );
    }

    #[test]
    fn arrival_before_opening_is_rejected() {
        let mut club = club(1);
        feed(&mut club, &["08:48 1 client1"]);
        assert_eq!(trace(&club), ["08:48 1 client1", "08:48 13 NotOpenYet"]);
        assert_eq!(club.clients().count(), 0);
    }

    #[test]
    fn double_arrival_is_rejected() {
        let mut club = club(1);
        feed(&mut club, &["09:10 1 bob", "09:20 1 bob"]);
        assert_eq!(
            trace(&club),
            ["09:10 1 bob", "09:20 1 bob", "09:20 13 YouShallNotPass"]
        );
    }

    #[test]
    fn sitting_requires_presence() {
        let mut club = club(2);
        feed(&mut club, &["09:10 2 ghost 1"]);
        assert_eq!(trace(&club), ["09:10 2 ghost 1", "09:10 13 ClientUnknown"]);
        assert!(!club.table(table(1)).unwrap().is_occupied());
    }

    #[test]
    fn table_range_is_checked_before_presence() {
        let mut club = club(2);
        feed(&mut club, &["09:10 2 ghost 3", "09:11 2 ghost 0", "09:12 2 ghost -1"]);
        assert_eq!(
            trace(&club),
            [
                "09:10 2 ghost 3",
                "09:10 13 InvalidTableNumber",
                "09:11 2 ghost 0",
                "09:11 13 InvalidTableNumber",
                "09:12 2 ghost -1",
                "09:12 13 InvalidTableNumber",
            ]
        );
    }

    #[test]
    fn busy_table_is_rejected_even_for_its_occupant() {
        let mut club = club(2);
        feed(
            &mut club,
            &[
                "09:10 1 a",
                "09:11 1 b",
                "09:12 2 a 1",
                "09:13 2 b 1",
                "09:14 2 a 1",
            ],
        );
        let log = trace(&club);
        assert_eq!(log[4], "09:13 13 PlaceIsBusy");
        assert_eq!(log[6], "09:14 13 PlaceIsBusy");
        assert_eq!(club.seat_of(&name("a")), Some(Seat::At(table(1))));
        assert_eq!(club.seat_of(&name("b")), Some(Seat::Unseated));
    }

    #[test]
    fn moving_tables_bills_the_previous_one() {
        let mut club = club(2);
        feed(&mut club, &["09:00 1 a", "09:00 2 a 1", "10:01 2 a 2"]);

        let first = club.table(table(1)).unwrap();
        assert!(!first.is_occupied());
        assert_eq!(first.revenue(), 20);
        assert_eq!(first.total_occupied(), t("01:01"));

        let second = club.table(table(2)).unwrap();
        assert_eq!(second.occupant(), Some(&name("a")));
        assert_eq!(second.session().unwrap().started_at, t("10:01"));
        assert_eq!(club.seat_of(&name("a")), Some(Seat::At(table(2))));
    }

    #[test]
    fn waiting_with_a_free_table_is_rejected() {
        let mut club = club(2);
        feed(&mut club, &["09:41 1 a", "09:52 3 a"]);
        assert_eq!(trace(&club)[2], "09:52 13 ICanWaitNoLonger!");
        assert_eq!(club.queue().count(), 0);
    }

    #[test]
    fn waiting_while_seated_has_its_own_error() {
        let mut club = club(1);
        feed(&mut club, &["09:41 1 a", "09:42 2 a 1", "09:43 3 a"]);
        assert_eq!(trace(&club)[3], "09:43 13 ClientAlreadySeated");
    }

    #[test]
    fn waiting_requires_presence() {
        let mut club = club(1);
        feed(&mut club, &["09:43 3 nobody"]);
        assert_eq!(trace(&club)[1], "09:43 13 ClientUnknown");
    }

    #[test]
    fn departure_promotes_head_of_queue() {
        let mut club = club(1);
        feed(
            &mut club,
            &[
                "09:00 1 client1",
                "09:05 2 client1 1",
                "09:30 1 client2",
                "09:35 3 client2",
                "10:00 4 client1",
            ],
        );

        assert_eq!(
            trace(&club),
            [
                "09:00 1 client1",
                "09:05 2 client1 1",
                "09:30 1 client2",
                "09:35 3 client2",
                "10:00 4 client1",
                "10:00 12 client2 1",
            ]
        );
        let first = club.table(table(1)).unwrap();
        assert_eq!(first.revenue(), 10);
        assert_eq!(first.occupant(), Some(&name("client2")));
        assert_eq!(first.session().unwrap().started_at, t("10:00"));
        assert_eq!(club.seat_of(&name("client1")), None);
        assert_eq!(club.seat_of(&name("client2")), Some(Seat::At(table(1))));
        assert_eq!(club.queue().count(), 0);
    }

    #[test]
    fn joining_a_full_queue_sends_the_client_away() {
        let mut club = club(1);
        feed(
            &mut club,
            &[
                "09:00 1 a",
                "09:01 2 a 1",
                "09:02 1 b",
                "09:03 3 b",
                "09:04 1 c",
                "09:05 3 c",
            ],
        );

        assert_eq!(trace(&club).last().unwrap(), "09:05 11 c");
        assert_eq!(club.seat_of(&name("c")), None);
        let queued: Vec<_> = club.queue().map(ClientName::as_str).collect();
        assert_eq!(queued, ["b"]);
    }

    #[test]
    fn queue_is_served_in_arrival_order() {
        let mut club = club(2);
        feed(
            &mut club,
            &[
                "09:00 1 a",
                "09:00 1 b",
                "09:00 1 c",
                "09:00 1 d",
                "09:01 2 a 1",
                "09:01 2 b 2",
                "09:02 3 c",
                "09:03 3 d",
                "10:00 4 b",
                "11:00 4 a",
            ],
        );
        let log = trace(&club);
        assert_eq!(log[9], "10:00 12 c 2");
        assert_eq!(log[11], "11:00 12 d 1");
    }

    #[test]
    fn departing_waiter_leaves_the_queue() {
        let mut club = club(1);
        feed(
            &mut club,
            &[
                "09:00 1 a",
                "09:01 2 a 1",
                "09:02 1 b",
                "09:03 3 b",
                "09:04 4 b",
                "09:05 4 a",
            ],
        );
        assert_eq!(trace(&club).last().unwrap(), "09:05 4 a");
        assert!(!club.table(table(1)).unwrap().is_occupied());
    }

    #[test]
    fn unseated_departure_does_not_bill() {
        let mut club = club(1);
        feed(&mut club, &["09:00 1 a", "12:00 4 a"]);
        assert_eq!(club.table(table(1)).unwrap().revenue(), 0);
        assert_eq!(trace(&club).len(), 2);
    }

    #[test]
    fn leaving_requires_presence() {
        let mut club = club(1);
        feed(&mut club, &["09:00 4 a"]);
        assert_eq!(trace(&club)[1], "09:00 13 ClientUnknown");
    }

    #[test]
    fn unknown_and_output_codes_are_rejected() {
        let mut club = club(1);
        feed(&mut club, &["09:00 7 a", "09:01 11 a", "09:02 13 PlaceIsBusy"]);
        assert_eq!(
            trace(&club),
            [
                "09:00 7 a",
                "09:00 13 UnknownEventType",
                "09:01 11 a",
                "09:01 13 UnknownEventType",
                "09:02 13 PlaceIsBusy",
                "09:02 13 UnknownEventType",
            ]
        );
    }

    #[test]
    fn malformed_bodies_are_logged_not_fatal() {
        let mut club = club(1);
        feed(&mut club, &["09:00 1", "09:01 2 a", "09:02 1 Bad", "09:03 1 a b"]);
        let errors: Vec<_> = trace(&club)
            .into_iter()
            .filter(|line| line.contains(" 13 "))
            .collect();
        assert_eq!(
            errors,
            [
                "09:00 13 MalformedEvent",
                "09:01 13 MalformedEvent",
                "09:02 13 MalformedEvent",
                "09:03 13 MalformedEvent",
            ]
        );
        assert_eq!(club.clients().count(), 0);
    }

    #[test]
    fn end_of_day_checks_out_in_name_order() {
        let mut club = club(3);
        feed(
            &mut club,
            &[
                "09:00 1 zed",
                "09:00 1 amy",
                "09:00 1 mia",
                "09:10 2 zed 1",
                "09:20 2 mia 2",
            ],
        );
        club.end_of_day();
        assert_consistent(&club);

        let log = trace(&club);
        assert_eq!(
            &log[log.len() - 3..],
            ["19:00 11 amy", "19:00 11 mia", "19:00 11 zed"]
        );
        assert_eq!(club.clients().count(), 0);

        let zed = club.table(table(1)).unwrap();
        assert_eq!(zed.total_occupied(), t("09:50"));
        assert_eq!(zed.revenue(), 100);
        let mia = club.table(table(2)).unwrap();
        assert_eq!(mia.total_occupied(), t("09:40"));
        assert_eq!(mia.revenue(), 100);
    }

    #[test]
    fn end_of_day_clears_the_queue() {
        let mut club = club(1);
        feed(&mut club, &["09:00 1 a", "09:01 2 a 1", "09:02 1 b", "09:03 3 b"]);
        club.end_of_day();
        assert_eq!(club.queue().count(), 0);
        assert_eq!(trace(&club)[4..], ["19:00 11 a", "19:00 11 b"]);
    }

    #[test]
    fn second_end_of_day_is_a_no_op() {
        let mut club = club(2);
        feed(&mut club, &["09:00 1 a", "09:01 2 a 2"]);
        club.end_of_day();
        let log_len = club.log().len();
        let revenue = club.table(table(2)).unwrap().revenue();

        club.end_of_day();

        assert_eq!(club.log().len(), log_len);
        assert_eq!(club.table(table(2)).unwrap().revenue(), revenue);
    }

    #[test]
    fn totals_never_decrease() {
        let mut club = club(2);
        let lines = [
            "09:00 1 a",
            "09:00 1 b",
            "09:05 2 a 1",
            "09:06 2 b 2",
            "09:30 1 c",
            "09:31 3 c",
            "10:00 4 a",
            "10:30 2 b 1",
            "11:00 4 c",
            "12:00 4 b",
        ];
        let mut previous: Vec<(TimeOfDay, u64)> = vec![(TimeOfDay::MIDNIGHT, 0); 2];
        for line in lines {
            feed(&mut club, &[line]);
            for (i, (_, table)) in club.tables().enumerate() {
                let (occupied, revenue) = previous[i];
                assert!(table.total_occupied() >= occupied);
                assert!(table.revenue() >= revenue);
                previous[i] = (table.total_occupied(), table.revenue());
            }
        }
    }
}
