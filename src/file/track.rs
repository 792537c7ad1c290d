use crate::event::Event;
use alloc::{collections::BTreeMap, vec::Vec};

#[doc = r#"
The events of one track chunk, indexed by time.

Events are stored against the absolute tick they occur at, so lookups are
exact. Beat positions are derived from the file's ticks per beat. Events that
share a position keep the order they were decoded in.

A paired [`Event::Note`] is stored at the tick its note on occurred, not the
tick of its note off.
"#]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    ticks_per_beat: u16,
    events: BTreeMap<u64, Vec<Event>>,
}

impl Track {
    /// Create an empty track for a file with the given tick rate
    pub const fn new(ticks_per_beat: u16) -> Self {
        Self {
            ticks_per_beat,
            events: BTreeMap::new(),
        }
    }

    /// Append an event at `tick`, after any events already at that tick.
    pub fn push(&mut self, tick: u64, event: Event) {
        self.events.entry(tick).or_default().push(event);
    }

    /// The tick rate used to turn ticks into beats
    pub const fn ticks_per_beat(&self) -> u16 {
        self.ticks_per_beat
    }

    /// Convert an absolute tick into beats
    pub fn tick_to_beat(&self, tick: u64) -> f64 {
        tick as f64 / self.ticks_per_beat as f64
    }

    /// Every occupied position in beats, in ascending order, with its events.
    pub fn beats(&self) -> impl Iterator<Item = (f64, &[Event])> {
        self.events
            .iter()
            .map(|(tick, events)| (self.tick_to_beat(*tick), events.as_slice()))
    }

    /// Every occupied position in ticks, in ascending order, with its events.
    pub fn ticks(&self) -> impl Iterator<Item = (u64, &[Event])> {
        self.events
            .iter()
            .map(|(tick, events)| (*tick, events.as_slice()))
    }

    /// The events at exactly `tick`
    pub fn events_at_tick(&self, tick: u64) -> &[Event] {
        self.events.get(&tick).map(Vec::as_slice).unwrap_or_default()
    }

    /// The events at exactly `beat`.
    ///
    /// Only beats that correspond to a whole tick can hold events.
    pub fn events_at_beat(&self, beat: f64) -> &[Event] {
        let tick = beat * self.ticks_per_beat as f64;
        let whole = tick as u64;
        // `as` saturates, so negative, NaN and huge ticks fail the round trip
        if !(tick >= 0. && tick < u64::MAX as f64 && whole as f64 == tick) {
            return &[];
        }
        self.events_at_tick(whole)
    }

    /// All events in time order
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.values().flatten()
    }

    /// Every paired note with its start beat
    pub fn notes(&self) -> impl Iterator<Item = (f64, &Event)> {
        self.beats().flat_map(|(beat, events)| {
            events
                .iter()
                .filter(|event| event.is_note())
                .map(move |event| (beat, event))
        })
    }

    /// The total number of events
    pub fn len(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }

    /// True if the track has no events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[test]
fn same_tick_keeps_insertion_order() {
    use pretty_assertions::assert_eq;
    let mut track = Track::new(96);
    track.push(96, Event::EndOfTrack);
    track.push(0, Event::Tempo { bpm: 120. });
    track.push(96, Event::ProgramChange {
        channel: 1,
        number: 4,
    });

    let beats: Vec<_> = track.beats().collect();
    assert_eq!(
        beats,
        [
            (0., &[Event::Tempo { bpm: 120. }][..]),
            (
                1.,
                &[
                    Event::EndOfTrack,
                    Event::ProgramChange {
                        channel: 1,
                        number: 4
                    }
                ][..]
            ),
        ]
    );
    assert_eq!(track.len(), 3);
}

#[test]
fn lookup_by_beat() {
    use pretty_assertions::assert_eq;
    let mut track = Track::new(96);
    track.push(48, Event::EndOfTrack);
    assert_eq!(track.events_at_beat(0.5), [Event::EndOfTrack]);
    assert!(track.events_at_beat(0.25).is_empty());
    assert!(track.events_at_beat(-1.).is_empty());
    assert!(track.events_at_beat(f64::NAN).is_empty());
    assert!(track.events_at_tick(47).is_empty());
}

#[test]
fn beat_between_ticks_is_empty() {
    use pretty_assertions::assert_eq;
    let mut track = Track::new(3);
    track.push(1, Event::EndOfTrack);
    // a third of a beat is exactly tick 1 after rounding
    assert_eq!(track.events_at_beat(1. / 3.), [Event::EndOfTrack]);
    assert!(track.events_at_beat(0.5).is_empty());
    assert!(track.events_at_beat(f64::INFINITY).is_empty());
    assert!(track.events_at_beat(1e30).is_empty());
}
