use soroban_sdk::{panic_with_error, symbol_short, Address, BytesN, Env, String, Vec};

use crate::{
    seeds,
    storage::{
        create_record, read_agent_of, read_protocol, read_service, write_protocol, write_service,
    },
    types::{
        DerivedAddress, PriceModel, ProtocolError, Record, Service, ServiceCreatedLog,
        ServiceUpdatedLog, MAX_DESCRIPTION_LEN, MAX_SERVICE_ID_LEN, MAX_TAGS, MAX_TAG_LEN,
        MAX_TITLE_LEN,
    },
    utils::{checked_add, now, require_len, require_list, require_non_empty},
};

pub fn create_service(
    e: &Env,
    authority: Address,
    service_id: String,
    title: String,
    description: String,
    price_lamports: u64,
    price_model: PriceModel,
    tags: Vec<String>,
) -> BytesN<32> {
    authority.require_auth();
    require_non_empty(e, &service_id);
    require_len(e, &service_id, MAX_SERVICE_ID_LEN, ProtocolError::ServiceIdTooLong);
    require_non_empty(e, &title);
    require_len(e, &title, MAX_TITLE_LEN, ProtocolError::TitleTooLong);
    require_len(e, &description, MAX_DESCRIPTION_LEN, ProtocolError::DescriptionTooLong);
    require_list(
        e,
        &tags,
        MAX_TAGS,
        MAX_TAG_LEN,
        ProtocolError::TooManyTags,
        ProtocolError::TagTooLong,
    );

    let (provider, agent) = read_agent_of(e, &authority);
    if !agent.is_active {
        panic_with_error!(e, ProtocolError::AgentInactive);
    }
    let mut protocol = read_protocol(e);

    let derived = seeds::service_address(e, &provider, &service_id);
    let service = Service {
        provider: provider.clone(),
        authority,
        service_id,
        title: title.clone(),
        description,
        price_lamports,
        price_model,
        tags,
        total_orders: 0,
        total_revenue: 0,
        avg_rating: 0,
        is_active: true,
        created_at: now(e),
        bump: derived.bump,
    };
    create_record(
        e,
        &derived.address,
        &Record::Service(service),
        ProtocolError::ServiceAlreadyExists,
    );

    protocol.total_services = checked_add(e, protocol.total_services, 1);
    write_protocol(e, &protocol);

    e.events().publish(
        (symbol_short!("service"), symbol_short!("created")),
        ServiceCreatedLog {
            service: derived.address.clone(),
            provider,
            title,
            price: price_lamports,
            price_model,
        },
    );

    derived.address
}

pub fn update_service(
    e: &Env,
    authority: Address,
    service: BytesN<32>,
    price_lamports: u64,
    is_active: bool,
) {
    authority.require_auth();
    let mut record = read_service(e, &service);
    if record.authority != authority {
        panic_with_error!(e, ProtocolError::Unauthorized);
    }
    record.price_lamports = price_lamports;
    record.is_active = is_active;
    write_service(e, &service, &record);

    e.events().publish(
        (symbol_short!("service"), symbol_short!("updated")),
        ServiceUpdatedLog {
            service,
            price: price_lamports,
            is_active,
        },
    );
}

/// Takes the service's current order count as the nonce for a new payment and
/// advances it. Must run in the same invocation that creates the payment.
pub fn record_order(e: &Env, address: &BytesN<32>, service: &mut Service) -> u64 {
    let nonce = service.total_orders;
    service.total_orders = checked_add(e, nonce, 1);
    write_service(e, address, service);
    nonce
}

/// Address the next payment for `service` from `payer_agent` will be created at.
pub fn next_payment_address(
    e: &Env,
    payer_agent: &BytesN<32>,
    service: &BytesN<32>,
) -> DerivedAddress {
    let record = read_service(e, service);
    seeds::payment_address(e, payer_agent, service, record.total_orders)
}
