//! Checks exporter output against an independent SMF parser.

use midly::{Format, MetaMessage, Smf, Timing, TrackEventKind};
use smfexport::{
    export, ClockPolicy, Document, ExportOptions, MetaEvent, MidiMessage, Sheet, SmfEncoder,
    Staff, TimedEvent, Voice,
};

fn demo_document() -> Document {
    let mut voice = Voice::new();
    voice.create_note(60, 100, 0, 480);
    voice.create_note(64, 90, 0, 480);
    voice.create_note(67, 80, 480, 960);

    let mut staff = Staff::new("Piano", 0);
    staff.program = 4;
    staff.add_voice(voice);

    let mut sheet = Sheet::new("Sheet 1");
    sheet.tempo = 90;
    sheet.time_sig_numerator = 3;
    sheet.time_sig_denominator = 8;
    sheet.key_sharps_flats = -2;
    sheet.add_staff(staff);

    let mut document = Document::new("Demo");
    document.add_sheet(sheet);
    document
}

#[test]
fn test_document_export_parses() {
    let mut data = Vec::new();
    SmfEncoder::default()
        .export_source(&demo_document(), &mut data)
        .unwrap();

    let smf = Smf::parse(&data).unwrap();
    assert_eq!(smf.header.format, Format::Parallel);
    match smf.header.timing {
        Timing::Metrical(tpb) => assert_eq!(tpb.as_int(), 480),
        other => panic!("unexpected timing {:?}", other),
    }
    assert_eq!(smf.tracks.len(), 2);

    // Control track: the two banner lines and the end marker.
    let control = &smf.tracks[0];
    assert_eq!(control.len(), 3);
    match control[0].kind {
        TrackEventKind::Meta(MetaMessage::Text(text)) => {
            assert!(text.starts_with(b"smfexport Version "))
        }
        other => panic!("unexpected control event {:?}", other),
    }
    assert_eq!(
        control[2].kind,
        TrackEventKind::Meta(MetaMessage::EndOfTrack)
    );

    let music = &smf.tracks[1];
    let metas: Vec<_> = music
        .iter()
        .filter_map(|e| match e.kind {
            TrackEventKind::Meta(meta) => Some(meta),
            _ => None,
        })
        .collect();
    match metas[0] {
        // 60_000_000 / 90, truncated.
        MetaMessage::Tempo(micros) => assert_eq!(micros.as_int(), 666_666),
        other => panic!("unexpected first meta event {:?}", other),
    }
    assert_eq!(metas[1], MetaMessage::TimeSignature(3, 3, 24, 8));
    assert_eq!(metas[2], MetaMessage::KeySignature(-2, false));
    assert_eq!(*metas.last().unwrap(), MetaMessage::EndOfTrack);

    // Absolute times of note ons and offs, rebuilt from the deltas.
    let mut tick = 0u32;
    let mut note_ons = Vec::new();
    let mut note_offs = Vec::new();
    for event in music {
        tick += event.delta.as_int();
        if let TrackEventKind::Midi { message, .. } = event.kind {
            match message {
                midly::MidiMessage::NoteOn { key, .. } => note_ons.push((tick, key.as_int())),
                midly::MidiMessage::NoteOff { key, .. } => note_offs.push((tick, key.as_int())),
                _ => {}
            }
        }
    }
    assert_eq!(note_ons, vec![(0, 60), (0, 64), (480, 67)]);
    assert_eq!(note_offs, vec![(480, 60), (480, 64), (1440, 67)]);
}

#[test]
fn test_raw_event_export_parses() {
    let events = vec![
        TimedEvent::midi(0, MidiMessage::note_on(0, 60, 100)),
        TimedEvent::midi(0, MidiMessage::note_on(0, 64, 100)),
        TimedEvent::midi(480, MidiMessage::note_off(0, 60, 0)),
        TimedEvent::meta(480, MetaEvent::Text("marker".to_string())),
    ];
    let mut data = Vec::new();
    export(480, &[], &events, &mut data).unwrap();

    let smf = Smf::parse(&data).unwrap();
    let deltas: Vec<u32> = smf.tracks[1].iter().map(|e| e.delta.as_int()).collect();
    assert_eq!(deltas, vec![0, 0, 480, 0, 0]);
    assert_eq!(smf.tracks[0].len(), 1);
}

#[test]
fn test_out_of_order_policies_produce_valid_files() {
    let events = vec![
        TimedEvent::midi(100, MidiMessage::note_on(0, 60, 100)),
        TimedEvent::midi(50, MidiMessage::note_on(0, 62, 100)),
        TimedEvent::midi(200, MidiMessage::note_on(0, 64, 100)),
    ];

    for (policy, expected) in [
        (ClockPolicy::ClampAndAdvance, vec![100, 0, 150, 0]),
        (ClockPolicy::StableSort, vec![50, 50, 100, 0]),
    ] {
        let encoder = SmfEncoder::new(ExportOptions {
            banner: None,
            clock_policy: policy,
        });
        let data = encoder.encode(96, &[], &events).unwrap();
        let smf = Smf::parse(&data).unwrap();
        let deltas: Vec<u32> = smf.tracks[1].iter().map(|e| e.delta.as_int()).collect();
        assert_eq!(deltas, expected, "{:?}", policy);
    }
}

#[test]
fn test_json_document_round_trip_exports_same_bytes() {
    let document = demo_document();
    let loaded = Document::from_json(&document.to_json().unwrap()).unwrap();

    let mut original = Vec::new();
    let mut reloaded = Vec::new();
    let encoder = SmfEncoder::default();
    encoder.export_source(&document, &mut original).unwrap();
    encoder.export_source(&loaded, &mut reloaded).unwrap();
    assert_eq!(original, reloaded);
}

#[test]
fn test_out_of_range_json_score_exports_seven_bit_data() {
    let json = r#"{
        "title": "Loud",
        "sheets": [{
            "name": "S",
            "tempo": 120,
            "time_sig_numerator": 4,
            "time_sig_denominator": 4,
            "staves": [{
                "name": "Piano",
                "channel": 0,
                "program": 0,
                "volume": 200,
                "pan": 64,
                "voices": [{"notes": [
                    {"pitch": 200, "velocity": 100, "start_tick": 0, "duration_ticks": 480}
                ]}]
            }]
        }]
    }"#;
    let document = Document::from_json(json).unwrap();
    let mut data = Vec::new();
    SmfEncoder::default()
        .export_source(&document, &mut data)
        .unwrap();

    let smf = Smf::parse(&data).unwrap();
    let mut note_ons = Vec::new();
    let mut volumes = Vec::new();
    for event in &smf.tracks[1] {
        if let TrackEventKind::Midi { message, .. } = event.kind {
            match message {
                midly::MidiMessage::NoteOn { key, vel } => {
                    note_ons.push((key.as_int(), vel.as_int()))
                }
                midly::MidiMessage::Controller { controller, value }
                    if controller.as_int() == 7 =>
                {
                    volumes.push(value.as_int())
                }
                _ => {}
            }
        }
    }
    assert_eq!(note_ons, vec![(127, 100)]);
    assert_eq!(volumes, vec![127]);
    assert!(!data.windows(3).any(|w| w == [0x90, 0xC8, 0x64]));
}
