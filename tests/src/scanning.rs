#![cfg(test)]
use nono_common::config::{Config, Rules};
use nono_common::contact::{Contact, PhoneNumber};
use nono_common::error::ContactsError;
use nono_core::queue::BATCH_LIMIT;
use nono_core::scanner::ContactScanner;
use nono_core::testing::{InMemoryContacts, RecordingReporter, ScriptedConfirm};
use pretty_assertions::assert_eq;

fn rules() -> Rules {
    Config::from_toml_str(
        r#"
        [rules]
        mnos = ["Vivo", "Claro", "TIM", "Oi"]
        ignore_labels = ["Trabalho", "Casa", "Fax"]
        "#,
    )
    .unwrap()
    .rules
}

fn mobiles(count: usize) -> Vec<Contact> {
    (0..count)
        .map(|n| {
            Contact::new(format!("people/c{n}"), format!("Contact {n}"))
                .with_phone(PhoneNumber::new(format!("11{}", 90_000_000 + n)))
        })
        .collect()
}

#[tokio::test]
async fn maria_silva_gets_her_ninth_digit() {
    let service = InMemoryContacts::new(vec![
        Contact::new("people/c1", "Maria Silva").with_phone(PhoneNumber::new("1199998877")),
    ]);
    let confirm = ScriptedConfirm::default();
    let rules = rules();

    let report = ContactScanner::new(&service, &confirm, &rules).run().await.unwrap();

    assert_eq!(report.queued_contacts, 1);
    assert_eq!(service.batch_sizes(), vec![1]);
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.outcomes[0].status_code, 200);
    assert_eq!(report.outcomes[0].contact_name, "Maria Silva");
    assert_eq!(
        service.stored("people/c1").unwrap().phone_numbers[0].value,
        "11999998877"
    );
}

#[tokio::test]
async fn joao_at_work_is_skipped() {
    let service = InMemoryContacts::new(vec![
        Contact::new("people/c2", "João").with_phone(PhoneNumber::new("1155550000").with_label("Trabalho")),
    ]);
    let confirm = ScriptedConfirm::default();
    let rules = rules();

    let report = ContactScanner::new(&service, &confirm, &rules).run().await.unwrap();

    assert!(report.audit.contains_skip("João: 1155550000 automático"));
    assert_eq!(report.audit.update_count(), 0);
    assert_eq!(report.queued_contacts, 0);
    assert!(service.batches().is_empty());
    assert_eq!(confirm.prompt_count(), 0);
}

#[tokio::test]
async fn carrier_label_is_fixed_without_asking() {
    let service = InMemoryContacts::new(vec![
        Contact::new("people/c3", "Bia").with_phone(PhoneNumber::new("1166660000").with_label("Claro")),
    ]);
    let confirm = ScriptedConfirm::default();
    let rules = rules();

    let report = ContactScanner::new(&service, &confirm, &rules).run().await.unwrap();

    assert!(report.audit.contains_update("Bia: 1166660000 - 11966660000 automático"));
    assert_eq!(confirm.prompt_count(), 0);
    assert_eq!(service.batch_sizes(), vec![1]);
}

#[tokio::test]
async fn numbers_outside_the_scheme_are_never_touched() {
    let numbers = ["+55 11 9999-8877", "2199998877", "1144445555", "11999998877", ""];
    let contact = numbers
        .iter()
        .fold(Contact::new("people/c4", "Caio"), |c, n| c.with_phone(PhoneNumber::new(*n)));
    let service = InMemoryContacts::new(vec![contact.clone()]);
    let confirm = ScriptedConfirm::default();
    let rules = rules();

    let report = ContactScanner::new(&service, &confirm, &rules).run().await.unwrap();

    assert_eq!(service.stored("people/c4").unwrap(), contact);
    assert_eq!(report.audit.skip_count(), numbers.len());
    assert!(report.audit.contains_skip("Caio: 2199998877 automático"));
    assert_eq!(confirm.prompt_count(), 0);
    assert!(service.snapshots().is_empty());
}

#[tokio::test]
async fn operator_decides_unlabelled_numbers() {
    let service = InMemoryContacts::new(vec![
        Contact::new("people/c5", "Duda").with_phone(PhoneNumber::new("1177770000")),
        Contact::new("people/c6", "Enzo").with_phone(PhoneNumber::new("1155551111").with_label("Pessoal")),
    ]);
    let confirm = ScriptedConfirm::answering([true, false]);
    let rules = rules();

    let report = ContactScanner::new(&service, &confirm, &rules).run().await.unwrap();

    assert_eq!(
        confirm.prompts(),
        vec![
            "Duda|1177770000|11977770000|".to_string(),
            "Enzo|1155551111|11955551111|Pessoal".to_string(),
        ]
    );
    assert!(report.audit.contains_update("Duda: 1177770000 - 11977770000 manual"));
    assert!(report.audit.contains_skip("Enzo: 1155551111 manual"));
    assert_eq!(report.queued_contacts, 1);
}

#[tokio::test]
async fn second_pass_is_a_no_op() {
    let service = InMemoryContacts::new(vec![
        Contact::new("people/c1", "Maria Silva").with_phone(PhoneNumber::new("1199998877")),
        Contact::new("people/c7", "Gabi").with_phone(PhoneNumber::new("01188887777")),
    ]);
    let confirm = ScriptedConfirm::default();
    let rules = rules();
    let scanner = ContactScanner::new(&service, &confirm, &rules);

    let first = scanner.run().await.unwrap();
    let second = scanner.run().await.unwrap();

    assert_eq!(first.queued_contacts, 2);
    assert_eq!(second.queued_contacts, 0);
    assert_eq!(second.audit.update_count(), 0);
    assert_eq!(service.batch_sizes(), vec![2]);
}

#[tokio::test]
async fn full_batches_flush_as_they_fill() {
    let service = InMemoryContacts::new(mobiles(2 * BATCH_LIMIT + 50));
    let confirm = ScriptedConfirm::default();
    let rules = rules();

    let report = ContactScanner::new(&service, &confirm, &rules).run().await.unwrap();

    assert_eq!(service.batch_sizes(), vec![BATCH_LIMIT, BATCH_LIMIT, 50]);
    assert_eq!(report.outcomes.len(), 2 * BATCH_LIMIT + 50);
}

#[tokio::test]
async fn exactly_one_full_batch_needs_no_final_flush() {
    let service = InMemoryContacts::new(mobiles(BATCH_LIMIT));
    let confirm = ScriptedConfirm::default();
    let reporter = RecordingReporter::default();
    let rules = rules();

    ContactScanner::new(&service, &confirm, &rules)
        .with_reporter(&reporter)
        .run()
        .await
        .unwrap();

    assert_eq!(service.batch_sizes(), vec![BATCH_LIMIT]);
    assert_eq!(reporter.submitted_batches(), vec![BATCH_LIMIT]);
    assert_eq!(reporter.queued().len(), BATCH_LIMIT);
}

#[tokio::test]
async fn refused_updates_are_reported_not_retried() {
    let service = InMemoryContacts::new(mobiles(3)).refusing("people/c1");
    let confirm = ScriptedConfirm::default();
    let rules = rules();

    let report = ContactScanner::new(&service, &confirm, &rules).run().await.unwrap();

    let refused: Vec<&str> = report
        .outcomes
        .iter()
        .filter(|o| !o.is_success())
        .map(|o| o.contact_id.as_str())
        .collect();
    assert_eq!(refused, vec!["people/c1"]);
    assert_eq!(service.batch_sizes(), vec![3]);
}

#[tokio::test]
async fn failed_batch_aborts_the_run() {
    let service = InMemoryContacts::new(mobiles(3)).failing_batches();
    let confirm = ScriptedConfirm::default();
    let rules = rules();

    let err = ContactScanner::new(&service, &confirm, &rules).run().await.unwrap_err();

    assert!(matches!(err, ContactsError::Transport(_)));
}

#[tokio::test]
async fn dry_run_leaves_the_address_book_alone() {
    let contacts = mobiles(BATCH_LIMIT + 1);
    let service = InMemoryContacts::new(contacts.clone());
    let confirm = ScriptedConfirm::default();
    let reporter = RecordingReporter::default();
    let rules = rules();

    let report = ContactScanner::new(&service, &confirm, &rules)
        .with_reporter(&reporter)
        .dry_run(true)
        .run()
        .await
        .unwrap();

    assert!(service.batches().is_empty());
    assert_eq!(reporter.discarded_batches(), vec![BATCH_LIMIT, 1]);
    assert_eq!(report.queued_contacts, BATCH_LIMIT + 1);
    assert!(report.outcomes.is_empty());
    assert_eq!(service.stored("people/c0").unwrap(), contacts[0]);
}

#[tokio::test]
async fn threshold_seven_from_config() {
    let rules = Config::from_toml_str("[rules]\nmobile_threshold = 7").unwrap().rules;
    let service = InMemoryContacts::new(vec![
        Contact::new("people/c8", "Hugo").with_phone(PhoneNumber::new("1177770000")),
    ]);
    let confirm = ScriptedConfirm::default();

    let report = ContactScanner::new(&service, &confirm, &rules).run().await.unwrap();

    assert!(report.audit.contains_update("Hugo: 1177770000 - 11977770000 automático"));
    assert_eq!(confirm.prompt_count(), 0);
}
