//! Shared fixture: a five-zone salon with a handful of exhibitors and events.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

use venue_model::{Catalog, EventRecord, ExhibitorRecord, Zone, ZoneEdge, ZoneId};

use crate::snapshot::VenueSnapshot;
use crate::zone_graph::PrefixRule;

pub fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, minute, 0).unwrap()
}

pub fn salon_zones() -> Vec<Zone> {
    vec![
        Zone::new("A", "Hall Principal").with_facilities(["Accueil", "Information", "Toilettes"]),
        Zone::new("B", "Technologie").with_facility("Démonstrations"),
        Zone::new("C", "Services").with_facility("Espace détente"),
        Zone::new("D", "Innovation").with_facility("Laboratoire"),
        Zone::new("E", "Restauration").with_facilities(["Restaurant", "Café", "Toilettes"]),
    ]
}

pub fn salon_edges() -> Vec<ZoneEdge> {
    vec![
        ZoneEdge::new("A", "B", 50),
        ZoneEdge::new("A", "C", 80),
        ZoneEdge::new("B", "C", 30),
        ZoneEdge::new("B", "D", 60),
        ZoneEdge::new("C", "D", 40),
        ZoneEdge::new("C", "E", 70),
        ZoneEdge::new("D", "E", 50),
    ]
}

pub fn salon_keywords() -> Vec<(ZoneId, Vec<String>)> {
    let table: [(&str, &[&str]); 5] = [
        ("A", &["accueil", "entrée", "principal", "reception"]),
        ("B", &["technologie", "tech", "démonstration"]),
        ("C", &["service", "détente"]),
        ("D", &["innovation", "laboratoire", "labo"]),
        ("E", &["restaurant", "café", "manger", "toilettes"]),
    ];
    table
        .iter()
        .map(|(zone, words)| {
            (
                ZoneId::from(*zone),
                words.iter().map(|w| w.to_string()).collect(),
            )
        })
        .collect()
}

pub fn salon_exhibitors() -> Vec<ExhibitorRecord> {
    vec![
        ExhibitorRecord::new("ex-1", "TechInnovation SARL", "Innovation", "B08")
            .with_description("Solutions IoT pour l'industrie")
            .with_contact("Jean Moreau")
            .with_tag("iot")
            .with_tag("industrie")
            .with_offer("Démo gratuite"),
        ExhibitorRecord::new("ex-2", "GreenPower", "Technologie", "D2")
            .with_description("Énergie solaire et innovation durable")
            .with_contact("Claire Dubois")
            .with_tag("énergie"),
        ExhibitorRecord::new("ex-3", "Conseil Plus", "Conseil", "C1")
            .with_description("Accompagnement stratégique des PME")
            .with_contact("Paul Girard")
            .with_tag("pme")
            .with_tag("stratégie"),
        ExhibitorRecord::new("ex-4", "DataViz Pro", "Technologie", "B12")
            .with_description("Tableaux de bord pour l'industrie")
            .with_contact("Nina Roux")
            .with_tag("data")
            .with_tag("visualisation"),
        ExhibitorRecord::new("ex-5", "Welcome Desk Co", "Services", "A1")
            .with_description("Bornes d'accueil interactives")
            .with_contact("Luc Petit")
            .with_tag("accueil"),
    ]
}

pub fn salon_events() -> Vec<EventRecord> {
    vec![
        EventRecord::new("ev-1", "Keynote: l'avenir de l'IA", at(12, 9, 0), at(12, 10, 0))
            .with_description("Vision sur l'intelligence artificielle")
            .with_category("Keynote")
            .with_speaker("Dr. Sophie Martin")
            .with_location("Auditorium")
            .with_tag("ia"),
        EventRecord::new("ev-2", "Atelier IoT", at(12, 11, 0), at(12, 12, 30))
            .with_description("Prototyper un capteur connecté")
            .with_category("Atelier")
            .with_speaker("Marc Leroy")
            .with_location("Salle 2")
            .with_tag("iot"),
        EventRecord::new("ev-3", "Table ronde énergie", at(12, 14, 0), at(12, 15, 0))
            .with_description("Transition énergétique et industrie")
            .with_category("Table ronde")
            .with_speaker("Claire Dubois")
            .with_location("Auditorium")
            .with_tag("énergie"),
        EventRecord::new("ev-4", "Démonstration robots", at(13, 10, 30), at(13, 11, 0))
            .with_description("Robots collaboratifs en action")
            .with_category("Démonstration")
            .with_speaker("Marc Leroy")
            .with_location("Zone B")
            .with_tag("robotique")
            .with_tag("iot"),
    ]
}

pub fn salon_catalog() -> Catalog {
    Catalog::new(salon_exhibitors(), salon_events()).unwrap()
}

pub fn salon_snapshot() -> VenueSnapshot {
    VenueSnapshot::builder()
        .name("Salon Tech")
        .zones(salon_zones())
        .edges(salon_edges())
        .keywords(salon_keywords())
        .booth_rule(PrefixRule::new(1))
        .build(Arc::new(salon_catalog()))
        .unwrap()
}
