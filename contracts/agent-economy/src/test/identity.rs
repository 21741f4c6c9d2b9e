use soroban_sdk::{testutils::Address as _, vec, Address, Env, String, Vec};

use super::{funded_agent, random_address, register, setup, text, FEE_BPS, SOL, START};
use crate::{AgentEconomy, AgentEconomyClient};

#[test]
fn initialize_records_protocol_config() {
    let e = Env::default();
    let (client, authority, treasury) = setup(&e);

    let protocol = client.get_protocol();
    assert_eq!(protocol.authority, authority);
    assert_eq!(protocol.treasury, treasury);
    assert_eq!(protocol.fee_bps, FEE_BPS);
    assert_eq!(protocol.total_agents, 0);
    assert_eq!(protocol.total_volume, 0);
    assert_eq!(protocol.bump, client.protocol_address().bump);
}

#[test]
#[should_panic(expected = "Error(Contract, #1)")]
fn initialize_twice_fails() {
    let e = Env::default();
    let (client, authority, treasury) = setup(&e);
    client.initialize(&authority, &treasury, &FEE_BPS);
}

#[test]
#[should_panic(expected = "Error(Contract, #23)")]
fn initialize_rejects_fee_above_cap() {
    let e = Env::default();
    e.mock_all_auths();
    let client = AgentEconomyClient::new(&e, &e.register(AgentEconomy, ()));
    client.initialize(&Address::generate(&e), &Address::generate(&e), &1_001);
}

#[test]
#[should_panic(expected = "Error(Contract, #2)")]
fn register_before_initialize_fails() {
    let e = Env::default();
    e.mock_all_auths();
    let client = AgentEconomyClient::new(&e, &e.register(AgentEconomy, ()));
    client.register_agent(
        &Address::generate(&e),
        &text(&e, "early"),
        &text(&e, ""),
        &Vec::new(&e),
        &text(&e, ""),
    );
}

#[test]
fn update_protocol_config_by_authority() {
    let e = Env::default();
    let (client, authority, _) = setup(&e);
    let new_treasury = Address::generate(&e);

    client.update_protocol_config(&authority, &new_treasury, &250);

    let protocol = client.get_protocol();
    assert_eq!(protocol.treasury, new_treasury);
    assert_eq!(protocol.fee_bps, 250);
}

#[test]
#[should_panic(expected = "Error(Contract, #3)")]
fn update_protocol_config_by_stranger_fails() {
    let e = Env::default();
    let (client, _, treasury) = setup(&e);
    client.update_protocol_config(&Address::generate(&e), &treasury, &0);
}

#[test]
fn register_agent_creates_agent_and_vault() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let (owner, agent) = register(&e, &client, "scribe");

    assert_eq!(agent, client.agent_address(&owner).address);

    let record = client.get_agent(&agent);
    assert_eq!(record.authority, owner);
    assert_eq!(record.name, text(&e, "scribe"));
    assert_eq!(record.capabilities.len(), 2);
    assert_eq!(record.reputation_score, 50);
    assert_eq!(record.registered_at, START);
    assert!(record.is_active);

    let vault = client.vault_address(&agent).address;
    assert_eq!(client.vault_balance(&vault), 0);
    assert_eq!(client.get_protocol().total_agents, 1);
}

#[test]
#[should_panic(expected = "Error(Contract, #25)")]
fn register_twice_fails() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let (owner, _) = register(&e, &client, "scribe");
    client.register_agent(
        &owner,
        &text(&e, "scribe-2"),
        &text(&e, ""),
        &Vec::new(&e),
        &text(&e, ""),
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #19)")]
fn register_with_empty_name_fails() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    client.register_agent(
        &Address::generate(&e),
        &text(&e, ""),
        &text(&e, ""),
        &Vec::new(&e),
        &text(&e, ""),
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #4)")]
fn register_with_long_name_fails() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    client.register_agent(
        &Address::generate(&e),
        &text(&e, "an-agent-name-that-is-longer-than-32"),
        &text(&e, ""),
        &Vec::new(&e),
        &text(&e, ""),
    );
}

#[test]
fn register_accepts_names_at_the_limit() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let name = text(&e, "abcdefghijklmnopqrstuvwxyz012345");
    let agent = client.register_agent(
        &Address::generate(&e),
        &name,
        &text(&e, ""),
        &Vec::new(&e),
        &text(&e, ""),
    );
    assert_eq!(client.get_agent(&agent).name, name);
}

#[test]
#[should_panic(expected = "Error(Contract, #6)")]
fn register_with_too_many_capabilities_fails() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let mut capabilities = Vec::new(&e);
    for _ in 0..11 {
        capabilities.push_back(text(&e, "ocr"));
    }
    client.register_agent(
        &Address::generate(&e),
        &text(&e, "reader"),
        &text(&e, ""),
        &capabilities,
        &text(&e, ""),
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #7)")]
fn register_with_long_capability_fails() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    client.register_agent(
        &Address::generate(&e),
        &text(&e, "reader"),
        &text(&e, ""),
        &vec![&e, text(&e, "optical-character-recognition-v2-x")],
        &text(&e, ""),
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #8)")]
fn register_with_long_endpoint_fails() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let endpoint = String::from_bytes(&e, &[b'a'; 129]);
    client.register_agent(
        &Address::generate(&e),
        &text(&e, "reader"),
        &text(&e, ""),
        &Vec::new(&e),
        &endpoint,
    );
}

#[test]
fn update_agent_replaces_profile() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let (owner, agent) = register(&e, &client, "scribe");

    client.update_agent(
        &owner,
        &text(&e, "now with translation"),
        &vec![&e, text(&e, "translate")],
        &text(&e, "https://scribe.example/v2"),
    );

    let record = client.get_agent(&agent);
    assert_eq!(record.description, text(&e, "now with translation"));
    assert_eq!(record.capabilities, vec![&e, text(&e, "translate")]);
    assert_eq!(record.endpoint, text(&e, "https://scribe.example/v2"));
    assert_eq!(record.name, text(&e, "scribe"));
}

#[test]
fn set_agent_active_toggles_flag() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let (owner, agent) = register(&e, &client, "scribe");

    client.set_agent_active(&owner, &false);
    assert!(!client.get_agent(&agent).is_active);
    client.set_agent_active(&owner, &true);
    assert!(client.get_agent(&agent).is_active);
}

#[test]
#[should_panic(expected = "Error(Contract, #24)")]
fn update_unknown_agent_fails() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    client.set_agent_active(&Address::generate(&e), &false);
}

#[test]
fn deposit_and_withdraw_move_available_balance() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let user = Address::generate(&e);

    client.deposit(&user, &(3 * SOL));
    client.withdraw(&user, &SOL);
    assert_eq!(client.balance_of(&user), (2 * SOL) as i128);
}

#[test]
#[should_panic(expected = "Error(Contract, #40)")]
fn withdraw_more_than_balance_fails() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let user = Address::generate(&e);
    client.deposit(&user, &SOL);
    client.withdraw(&user, &(SOL + 1));
}

#[test]
fn stake_locks_funds_and_raises_score() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let (owner, agent) = funded_agent(&e, &client, "staker", 10 * SOL);

    client.stake_reputation(&owner, &(4 * SOL));

    let record = client.get_agent(&agent);
    assert_eq!(record.total_staked, 4 * SOL);
    // log2(4) * 10 on top of the base score
    assert_eq!(record.reputation_score, 70);
    assert_eq!(client.balance_of(&owner), (6 * SOL) as i128);
    let vault = client.vault_address(&agent).address;
    assert_eq!(client.vault_balance(&vault), 4 * SOL);
    assert_eq!(client.get_protocol().total_staked, 4 * SOL);
}

#[test]
fn stake_below_one_sol_keeps_base_score() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let (owner, agent) = funded_agent(&e, &client, "staker", SOL);

    client.stake_reputation(&owner, &1);
    assert_eq!(client.get_agent(&agent).reputation_score, 50);
    client.stake_reputation(&owner, &(SOL - 1));
    assert_eq!(client.get_agent(&agent).reputation_score, 50);
}

#[test]
#[should_panic(expected = "Error(Contract, #9)")]
fn stake_zero_fails() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let (owner, _) = funded_agent(&e, &client, "staker", SOL);
    client.stake_reputation(&owner, &0);
}

#[test]
#[should_panic(expected = "Error(Contract, #40)")]
fn stake_more_than_balance_fails() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let (owner, _) = funded_agent(&e, &client, "staker", SOL);
    client.stake_reputation(&owner, &(2 * SOL));
}

#[test]
fn unstake_returns_funds_and_lowers_score() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let (owner, agent) = funded_agent(&e, &client, "staker", 8 * SOL);

    client.stake_reputation(&owner, &(8 * SOL));
    assert_eq!(client.get_agent(&agent).reputation_score, 80);

    client.unstake_reputation(&owner, &(6 * SOL));

    let record = client.get_agent(&agent);
    assert_eq!(record.total_staked, 2 * SOL);
    assert_eq!(record.reputation_score, 60);
    assert_eq!(client.balance_of(&owner), (6 * SOL) as i128);
    assert_eq!(client.get_protocol().total_staked, 2 * SOL);
}

#[test]
#[should_panic(expected = "Error(Contract, #41)")]
fn unstake_more_than_staked_fails() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let (owner, _) = funded_agent(&e, &client, "staker", 2 * SOL);
    client.stake_reputation(&owner, &SOL);
    client.unstake_reputation(&owner, &(SOL + 1));
}

#[test]
fn feedback_updates_target_reputation() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let (alice, alice_agent) = register(&e, &client, "alice");
    let (bob, bob_agent) = register(&e, &client, "bob");

    client.submit_feedback(&alice, &bob_agent, &5, &text(&e, "fast and accurate"));
    client.submit_feedback(&bob, &alice_agent, &2, &text(&e, "slow"));

    let bob_record = client.get_agent(&bob_agent);
    assert_eq!(bob_record.feedbacks_received, 1);
    assert_eq!(bob_record.rating_total, 5);
    assert_eq!(bob_record.reputation_score, 55);
    assert_eq!(client.get_agent(&alice_agent).reputation_score, 52);

    let feedback = client.get_feedback(&alice_agent, &bob_agent).unwrap();
    assert_eq!(feedback.rating, 5);
    assert_eq!(feedback.from_agent, alice_agent);
    assert_eq!(feedback.timestamp, START);
    assert!(client.get_feedback(&bob_agent, &bob_agent).is_none());
}

#[test]
#[should_panic(expected = "Error(Contract, #30)")]
fn feedback_twice_for_same_pair_fails() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let (alice, _) = register(&e, &client, "alice");
    let (_, bob_agent) = register(&e, &client, "bob");

    client.submit_feedback(&alice, &bob_agent, &4, &text(&e, ""));
    client.submit_feedback(&alice, &bob_agent, &5, &text(&e, "changed my mind"));
}

#[test]
#[should_panic(expected = "Error(Contract, #10)")]
fn feedback_rating_zero_fails() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let (alice, _) = register(&e, &client, "alice");
    let (_, bob_agent) = register(&e, &client, "bob");
    client.submit_feedback(&alice, &bob_agent, &0, &text(&e, ""));
}

#[test]
#[should_panic(expected = "Error(Contract, #10)")]
fn feedback_rating_six_fails() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let (alice, _) = register(&e, &client, "alice");
    let (_, bob_agent) = register(&e, &client, "bob");
    client.submit_feedback(&alice, &bob_agent, &6, &text(&e, ""));
}

#[test]
#[should_panic(expected = "Error(Contract, #11)")]
fn feedback_with_long_comment_fails() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let (alice, _) = register(&e, &client, "alice");
    let (_, bob_agent) = register(&e, &client, "bob");
    let comment = String::from_bytes(&e, &[b'x'; 257]);
    client.submit_feedback(&alice, &bob_agent, &3, &comment);
}

#[test]
#[should_panic(expected = "Error(Contract, #31)")]
fn feedback_on_self_fails() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let (alice, alice_agent) = register(&e, &client, "alice");
    client.submit_feedback(&alice, &alice_agent, &5, &text(&e, ""));
}

#[test]
#[should_panic(expected = "Error(Contract, #24)")]
fn feedback_for_unknown_agent_fails() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let (alice, _) = register(&e, &client, "alice");
    client.submit_feedback(&alice, &random_address(&e, 7), &5, &text(&e, ""));
}

#[test]
#[should_panic(expected = "Error(Contract, #43)")]
fn reading_a_vault_as_an_agent_fails() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    let (_, agent) = register(&e, &client, "scribe");
    client.get_agent(&client.vault_address(&agent).address);
}

#[test]
#[should_panic(expected = "Error(Contract, #42)")]
fn vault_balance_of_unknown_address_fails() {
    let e = Env::default();
    let (client, _, _) = setup(&e);
    client.vault_balance(&random_address(&e, 5));
}
