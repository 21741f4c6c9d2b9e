extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    vec, Address, BytesN, Env, String, Vec,
};

use crate::{AgentEconomy, AgentEconomyClient, PriceModel};

mod identity;

pub const SOL: u64 = 1_000_000_000;
pub const FEE_BPS: u32 = 10;
pub const START: u64 = 1_700_000_000;

/// Registers the contract, initializes the protocol and returns the client
/// together with the protocol authority and treasury.
pub fn setup(e: &Env) -> (AgentEconomyClient<'_>, Address, Address) {
    e.mock_all_auths();
    e.ledger().set_timestamp(START);
    let contract_id = e.register(AgentEconomy, ());
    let client = AgentEconomyClient::new(e, &contract_id);
    let authority = Address::generate(e);
    let treasury = Address::generate(e);
    client.initialize(&authority, &treasury, &FEE_BPS);
    (client, authority, treasury)
}

pub fn text(e: &Env, value: &str) -> String {
    String::from_str(e, value)
}

pub fn register(e: &Env, client: &AgentEconomyClient<'_>, name: &str) -> (Address, BytesN<32>) {
    let owner = Address::generate(e);
    let agent = client.register_agent(
        &owner,
        &text(e, name),
        &text(e, "autonomous test agent"),
        &vec![e, text(e, "inference"), text(e, "search")],
        &text(e, "https://agents.example/rpc"),
    );
    (owner, agent)
}

/// Registers an agent whose owner already holds `balance` lamports.
pub fn funded_agent(
    e: &Env,
    client: &AgentEconomyClient<'_>,
    name: &str,
    balance: u64,
) -> (Address, BytesN<32>) {
    let (owner, agent) = register(e, client, name);
    client.deposit(&owner, &balance);
    (owner, agent)
}

pub fn list_service(
    e: &Env,
    client: &AgentEconomyClient<'_>,
    owner: &Address,
    service_id: &str,
    price: u64,
) -> BytesN<32> {
    client.create_service(
        owner,
        &text(e, service_id),
        &text(e, "Document summarization"),
        &text(e, "Summarizes documents up to 100 pages"),
        &price,
        &PriceModel::Fixed,
        &vec![e, text(e, "nlp")],
    )
}

/// Pays for `service`, deriving the payment address from the service's
/// current order count the way a client would.
pub fn pay(
    e: &Env,
    client: &AgentEconomyClient<'_>,
    payer: &Address,
    service: &BytesN<32>,
    amount: u64,
    timeout_seconds: u64,
) -> BytesN<32> {
    let payer_agent = client.agent_address(payer).address;
    let payment = client.next_payment_address(&payer_agent, service).address;
    client.pay_for_service(
        payer,
        service,
        &payment,
        &amount,
        &text(e, "summarize quarterly report"),
        &Vec::new(e),
        &timeout_seconds,
    )
}

pub fn advance_to(e: &Env, timestamp: u64) {
    e.ledger().set_timestamp(timestamp);
}

pub fn random_address(e: &Env, byte: u8) -> BytesN<32> {
    BytesN::from_array(e, &[byte; 32])
}
