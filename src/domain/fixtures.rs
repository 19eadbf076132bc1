//! Built-in demo records.
//!
//! The plugin has no backend; the worker serves these lists on startup and
//! they never change for the lifetime of the session.

use super::records::{
    Activity, Client, ClientKind, Intervention, RecordSet, Role, User, WorkflowState,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn intervention(
    id: &str,
    description: &str,
    client: &str,
    activity: &str,
    status: &str,
    employee: &str,
    urgent: bool,
    start: NaiveDate,
    end: Option<NaiveDate>,
    duration: &str,
    notes: &str,
) -> Intervention {
    Intervention {
        id: id.to_string(),
        code: format!("INT-{id:0>5}"),
        description: description.to_string(),
        client: client.to_string(),
        activity: activity.to_string(),
        status: status.to_string(),
        employee: employee.to_string(),
        urgent,
        start_date: start,
        end_date: end,
        duration: duration.to_string(),
        notes: Some(notes.to_string()),
    }
}

#[must_use]
pub fn interventions() -> Vec<Intervention> {
    vec![
        intervention(
            "1",
            "Installazione nuovo sistema di backup automatico per server principale",
            "Azienda ABC S.r.l.",
            "Installazione",
            "In corso",
            "Mario Rossi",
            true,
            date(2025, 7, 7),
            Some(date(2025, 7, 8)),
            "03:25",
            "Backup automatico configurato correttamente",
        ),
        intervention(
            "2",
            "Manutenzione ordinaria server e aggiornamento sistema operativo",
            "Studio Legale XYZ",
            "Manutenzione",
            "Completato",
            "Luigi Verdi",
            false,
            date(2025, 7, 6),
            Some(date(2025, 7, 6)),
            "02:15",
            "Sistema aggiornato senza problemi",
        ),
        intervention(
            "3",
            "Riparazione stampante di rete e configurazione driver",
            "Farmacia Centrale",
            "Riparazione",
            "Programmato",
            "Anna Bianchi",
            false,
            date(2025, 7, 8),
            None,
            "01:30",
            "Driver aggiornati richiesti",
        ),
        intervention(
            "4",
            "Installazione nuovo punto vendita e configurazione POS",
            "Negozio Elettronica",
            "Installazione",
            "In corso",
            "Mario Rossi",
            true,
            date(2025, 7, 7),
            None,
            "05:45",
            "Configurazione POS complessa",
        ),
        intervention(
            "5",
            "Consulenza tecnica per migrazione cloud",
            "Azienda ABC S.r.l.",
            "Consulenza",
            "Completato",
            "Luigi Verdi",
            false,
            date(2025, 7, 5),
            Some(date(2025, 7, 5)),
            "04:10",
            "Migrazione completata con successo",
        ),
    ]
}

#[must_use]
pub fn clients() -> Vec<Client> {
    vec![
        Client {
            id: "1".into(),
            name: "Azienda ABC S.r.l.".into(),
            kind: ClientKind::Company,
            phone: "+39 02 1234567".into(),
            email: "info@aziendaabc.it".into(),
            notes: Some("Cliente importante".into()),
        },
        Client {
            id: "2".into(),
            name: "Studio Legale XYZ".into(),
            kind: ClientKind::Company,
            phone: "+39 06 7654321".into(),
            email: "contatti@studioxyz.it".into(),
            notes: None,
        },
        Client {
            id: "3".into(),
            name: "Mario Bianchi".into(),
            kind: ClientKind::Private,
            phone: "+39 347 1234567".into(),
            email: "mario.bianchi@email.it".into(),
            notes: None,
        },
    ]
}

#[must_use]
pub fn activities() -> Vec<Activity> {
    ["Installazione", "Manutenzione", "Riparazione"]
        .iter()
        .enumerate()
        .map(|(i, name)| Activity {
            id: (i + 1).to_string(),
            name: (*name).to_string(),
        })
        .collect()
}

#[must_use]
pub fn states() -> Vec<WorkflowState> {
    [
        ("Nuovo", "#3b82f6"),
        ("In corso", "#f59e0b"),
        ("Completato", "#10b981"),
        ("Sospeso", "#ef4444"),
    ]
    .iter()
    .enumerate()
    .map(|(i, (name, color))| WorkflowState {
        id: (i + 1).to_string(),
        name: (*name).to_string(),
        color: (*color).to_string(),
    })
    .collect()
}

#[must_use]
pub fn users() -> Vec<User> {
    [
        ("Mario", "Rossi", Role::Admin),
        ("Luigi", "Verdi", Role::Operator),
        ("Anna", "Bianchi", Role::Operator),
    ]
    .iter()
    .enumerate()
    .map(|(i, (first, last, role))| User {
        id: (i + 1).to_string(),
        first_name: (*first).to_string(),
        last_name: (*last).to_string(),
        email: format!("{}.{}@zentask.it", first.to_lowercase(), last.to_lowercase()),
        role: *role,
    })
    .collect()
}

/// All demo lists bundled for the worker's `RecordsLoaded` response.
#[must_use]
pub fn record_set() -> RecordSet {
    RecordSet {
        interventions: interventions(),
        clients: clients(),
        activities: activities(),
        states: states(),
        users: users(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intervention_codes_are_zero_padded() {
        let codes: Vec<String> = interventions().into_iter().map(|i| i.code).collect();
        assert_eq!(codes[0], "INT-00001");
        assert_eq!(codes[4], "INT-00005");
    }

    #[test]
    fn record_set_sizes() {
        let set = record_set();
        assert_eq!(set.interventions.len(), 5);
        assert_eq!(set.clients.len(), 3);
        assert_eq!(set.activities.len(), 3);
        assert_eq!(set.states.len(), 4);
        assert_eq!(set.users.len(), 3);
        assert_eq!(set.users[1].email, "luigi.verdi@zentask.it");
    }
}
