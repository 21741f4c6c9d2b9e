use soroban_sdk::{panic_with_error, symbol_short, Address, BytesN, Env, String, Vec};

use crate::{
    reputation,
    seeds::{self, RecordKind},
    storage::{
        create_record, read_agent, read_agent_of, read_feedback, read_protocol, write_agent,
        write_protocol,
    },
    types::{
        Agent, AgentRegisteredLog, AgentUpdatedLog, Feedback, FeedbackSubmittedLog, Protocol,
        ProtocolConfigLog, ProtocolError, ProtocolInitializedLog, Record, ReputationStakeLog,
        Vault, MAX_CAPABILITIES, MAX_CAPABILITY_LEN, MAX_COMMENT_LEN, MAX_DESCRIPTION_LEN,
        MAX_ENDPOINT_LEN, MAX_FEE_BPS, MAX_NAME_LEN, MAX_RATING, MIN_RATING,
    },
    utils::{
        checked_add, checked_sub, credit_balance, debit_balance, fund_vault, now, pay_out,
        require_len, require_list, require_non_empty, require_positive,
    },
};

pub fn initialize(e: &Env, authority: Address, treasury: Address, fee_bps: u32) {
    authority.require_auth();
    if fee_bps > MAX_FEE_BPS {
        panic_with_error!(e, ProtocolError::InvalidFee);
    }

    let derived = seeds::protocol_address(e);
    let protocol = Protocol {
        authority: authority.clone(),
        total_agents: 0,
        total_services: 0,
        total_payments: 0,
        total_volume: 0,
        total_staked: 0,
        fee_bps,
        treasury: treasury.clone(),
        bump: derived.bump,
    };
    create_record(
        e,
        &derived.address,
        &Record::Protocol(protocol),
        ProtocolError::AlreadyInitialized,
    );

    e.events().publish(
        (symbol_short!("protocol"), symbol_short!("init")),
        ProtocolInitializedLog {
            authority,
            treasury,
            fee_bps,
            timestamp: now(e),
        },
    );
}

pub fn update_protocol_config(e: &Env, authority: Address, treasury: Address, fee_bps: u32) {
    authority.require_auth();
    let mut protocol = read_protocol(e);
    if protocol.authority != authority {
        panic_with_error!(e, ProtocolError::Unauthorized);
    }
    if fee_bps > MAX_FEE_BPS {
        panic_with_error!(e, ProtocolError::InvalidFee);
    }
    protocol.fee_bps = fee_bps;
    protocol.treasury = treasury.clone();
    write_protocol(e, &protocol);

    e.events().publish(
        (symbol_short!("protocol"), symbol_short!("config")),
        ProtocolConfigLog { treasury, fee_bps },
    );
}

fn validate_profile(e: &Env, description: &String, capabilities: &Vec<String>, endpoint: &String) {
    require_len(e, description, MAX_DESCRIPTION_LEN, ProtocolError::DescriptionTooLong);
    require_list(
        e,
        capabilities,
        MAX_CAPABILITIES,
        MAX_CAPABILITY_LEN,
        ProtocolError::TooManyCapabilities,
        ProtocolError::CapabilityTooLong,
    );
    require_len(e, endpoint, MAX_ENDPOINT_LEN, ProtocolError::EndpointTooLong);
}

pub fn register_agent(
    e: &Env,
    authority: Address,
    name: String,
    description: String,
    capabilities: Vec<String>,
    endpoint: String,
) -> BytesN<32> {
    authority.require_auth();
    require_non_empty(e, &name);
    require_len(e, &name, MAX_NAME_LEN, ProtocolError::NameTooLong);
    validate_profile(e, &description, &capabilities, &endpoint);

    let mut protocol = read_protocol(e);

    let derived = seeds::agent_address(e, &authority);
    let mut agent = Agent {
        authority: authority.clone(),
        name: name.clone(),
        description,
        capabilities,
        endpoint,
        reputation_score: 0,
        total_staked: 0,
        total_earned: 0,
        total_spent: 0,
        services_completed: 0,
        services_requested: 0,
        feedbacks_received: 0,
        rating_total: 0,
        registered_at: now(e),
        is_active: true,
        bump: derived.bump,
    };
    reputation::refresh(&mut agent);
    create_record(
        e,
        &derived.address,
        &Record::Agent(agent.clone()),
        ProtocolError::AgentAlreadyRegistered,
    );

    let vault = seeds::vault_address(e, &derived.address);
    create_record(
        e,
        &vault.address,
        &Record::Vault(Vault {
            owner: derived.address.clone(),
            balance: 0,
            bump: vault.bump,
        }),
        ProtocolError::AddressCollision,
    );

    protocol.total_agents = checked_add(e, protocol.total_agents, 1);
    write_protocol(e, &protocol);

    e.events().publish(
        (symbol_short!("agent"), symbol_short!("register")),
        AgentRegisteredLog {
            agent: derived.address.clone(),
            authority,
            name,
            timestamp: agent.registered_at,
        },
    );

    derived.address
}

pub fn update_agent(
    e: &Env,
    authority: Address,
    description: String,
    capabilities: Vec<String>,
    endpoint: String,
) {
    authority.require_auth();
    validate_profile(e, &description, &capabilities, &endpoint);

    let (address, mut agent) = read_agent_of(e, &authority);
    agent.description = description;
    agent.capabilities = capabilities;
    agent.endpoint = endpoint;
    write_agent(e, &address, &agent);

    e.events().publish(
        (symbol_short!("agent"), symbol_short!("update")),
        AgentUpdatedLog {
            agent: address,
            is_active: agent.is_active,
        },
    );
}

pub fn set_agent_active(e: &Env, authority: Address, is_active: bool) {
    authority.require_auth();
    let (address, mut agent) = read_agent_of(e, &authority);
    agent.is_active = is_active;
    write_agent(e, &address, &agent);

    e.events().publish(
        (symbol_short!("agent"), symbol_short!("update")),
        AgentUpdatedLog {
            agent: address,
            is_active,
        },
    );
}

pub fn stake_reputation(e: &Env, authority: Address, amount: u64) {
    authority.require_auth();
    require_positive(e, amount);

    let (address, mut agent) = read_agent_of(e, &authority);
    let mut protocol = read_protocol(e);
    let vault = seeds::vault_address(e, &address).address;

    fund_vault(e, &authority, RecordKind::Vault, &vault, amount);

    agent.total_staked = checked_add(e, agent.total_staked, amount);
    protocol.total_staked = checked_add(e, protocol.total_staked, amount);
    let new_score = reputation::refresh(&mut agent);
    write_agent(e, &address, &agent);
    write_protocol(e, &protocol);

    e.events().publish(
        (symbol_short!("agent"), symbol_short!("stake")),
        ReputationStakeLog {
            agent: address,
            amount,
            new_score,
            total_staked: agent.total_staked,
        },
    );
}

pub fn unstake_reputation(e: &Env, authority: Address, amount: u64) {
    authority.require_auth();
    require_positive(e, amount);

    let (address, mut agent) = read_agent_of(e, &authority);
    if amount > agent.total_staked {
        panic_with_error!(e, ProtocolError::InsufficientStake);
    }
    let mut protocol = read_protocol(e);
    let vault = seeds::vault_address(e, &address).address;

    pay_out(e, RecordKind::Vault, &vault, &authority, amount);

    agent.total_staked -= amount;
    protocol.total_staked = checked_sub(e, protocol.total_staked, amount);
    let new_score = reputation::refresh(&mut agent);
    write_agent(e, &address, &agent);
    write_protocol(e, &protocol);

    e.events().publish(
        (symbol_short!("agent"), symbol_short!("unstake")),
        ReputationStakeLog {
            agent: address,
            amount,
            new_score,
            total_staked: agent.total_staked,
        },
    );
}

pub fn submit_feedback(
    e: &Env,
    authority: Address,
    to_agent: BytesN<32>,
    rating: u32,
    comment: String,
) {
    authority.require_auth();
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        panic_with_error!(e, ProtocolError::InvalidRating);
    }
    require_len(e, &comment, MAX_COMMENT_LEN, ProtocolError::CommentTooLong);

    let (from_agent, _) = read_agent_of(e, &authority);
    if from_agent == to_agent {
        panic_with_error!(e, ProtocolError::SelfDealing);
    }
    let mut target = read_agent(e, &to_agent);

    let derived = seeds::feedback_address(e, &from_agent, &to_agent);
    let feedback = Feedback {
        from_agent: from_agent.clone(),
        to_agent: to_agent.clone(),
        rating,
        comment,
        timestamp: now(e),
        bump: derived.bump,
    };
    create_record(
        e,
        &derived.address,
        &Record::Feedback(feedback),
        ProtocolError::FeedbackAlreadySubmitted,
    );

    target.feedbacks_received = checked_add(e, target.feedbacks_received, 1);
    target.rating_total = checked_add(e, target.rating_total, rating as u64);
    let new_reputation = reputation::refresh(&mut target);
    write_agent(e, &to_agent, &target);

    e.events().publish(
        (symbol_short!("agent"), symbol_short!("feedback")),
        FeedbackSubmittedLog {
            from: from_agent,
            to: to_agent,
            rating,
            new_reputation,
        },
    );
}

pub fn get_feedback(e: &Env, from_agent: BytesN<32>, to_agent: BytesN<32>) -> Option<Feedback> {
    let address = seeds::feedback_address(e, &from_agent, &to_agent).address;
    read_feedback(e, &address)
}

pub fn deposit(e: &Env, user: Address, amount: u64) {
    user.require_auth();
    require_positive(e, amount);
    credit_balance(e, &user, amount);
}

pub fn withdraw(e: &Env, user: Address, amount: u64) {
    user.require_auth();
    require_positive(e, amount);
    debit_balance(e, &user, amount);
}

