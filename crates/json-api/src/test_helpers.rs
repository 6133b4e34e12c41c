//! Test helpers.

use std::{collections::BTreeMap, sync::Arc};

use jiff::{Timestamp, civil::date};
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use rentreturn_app::{
    auth::MockAuthService,
    context::AppContext,
    domain::{
        identity::MockIdentityService,
        products::{
            MockProductsService,
            records::{ProductCategory, ProductRecord, ProductStatus, ProductUuid},
        },
        rentals::{
            MockRentalsService,
            records::{RentalRecord, RentalStatus, RentalUuid, ReturnRequestState},
        },
        users::{
            MockUsersService,
            records::{ReviewStatus, Role, UserRecord, UserUuid},
        },
    },
};

use crate::{extensions::*, state::State};

pub(crate) fn make_user(role: Role) -> UserRecord {
    let uuid = UserUuid::new();

    UserRecord {
        uuid,
        name: format!("Test {role}"),
        email: format!("{}@example.test", uuid.into_uuid().simple()),
        role,
        kyc_status: ReviewStatus::Approved,
        verification_status: ReviewStatus::Approved,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(uuid: ProductUuid, vendor: &UserRecord) -> ProductRecord {
    ProductRecord {
        uuid,
        vendor_uuid: vendor.uuid,
        vendor_name: vendor.name.clone(),
        vendor_rating: Decimal::ZERO,
        name: "Trail bike".to_string(),
        description: "Hardtail with front suspension".to_string(),
        category: ProductCategory::Sports,
        image_url: None,
        price_per_day: Decimal::from(25),
        refundable_deposit: Decimal::from(5),
        status: ProductStatus::Available,
        specifications: BTreeMap::from([("frame".to_string(), "M".to_string())]),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A three day active rental running 2024-06-01 to 2024-06-04.
pub(crate) fn make_rental(uuid: RentalUuid, renter: &UserRecord, product: ProductUuid) -> RentalRecord {
    RentalRecord {
        uuid,
        renter_uuid: renter.uuid,
        product_uuid: product,
        start_date: date(2024, 6, 1),
        end_date: date(2024, 6, 4),
        status: RentalStatus::Active,
        total_amount: Decimal::from(80),
        payment_intent_id: "pi_1".to_string(),
        delivery_address: "12 Harbour Road".to_string(),
        contact_phone: "+15550100".to_string(),
        handed_over_at: None,
        returned_at: None,
        fine_amount: Decimal::ZERO,
        daily_fine: Decimal::from(100),
        return_request: ReturnRequestState::default(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

fn strict_users_mock() -> MockUsersService {
    let mut users = MockUsersService::new();

    users.expect_create_user().never();
    users.expect_get_user().never();
    users.expect_set_kyc_status().never();
    users.expect_set_verification_status().never();
    users.expect_list_pending_vendors().never();

    users
}

fn strict_identity_mock() -> MockIdentityService {
    let mut identity = MockIdentityService::new();

    identity.expect_submit_document().never();
    identity.expect_document_status().never();

    identity
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_list_vendor_products().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_rentals_mock() -> MockRentalsService {
    let mut rentals = MockRentalsService::new();

    rentals.expect_create_rental().never();
    rentals.expect_confirm_rental().never();
    rentals.expect_request_return().never();
    rentals.expect_reject_return().never();
    rentals.expect_approve_return().never();
    rentals.expect_mark_handed_over().never();
    rentals.expect_list_renter_rentals().never();
    rentals.expect_vendor_dashboard().never();
    rentals.expect_list_disputes().never();
    rentals.expect_platform_stats().never();

    rentals
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

/// Service mocks behind a test [`State`]. Any mock a test does not replace
/// fails on first use.
pub(crate) struct Mocks {
    pub users: MockUsersService,
    pub identity: MockIdentityService,
    pub products: MockProductsService,
    pub rentals: MockRentalsService,
    pub auth: MockAuthService,
}

impl Default for Mocks {
    fn default() -> Self {
        Self {
            users: strict_users_mock(),
            identity: strict_identity_mock(),
            products: strict_products_mock(),
            rentals: strict_rentals_mock(),
            auth: strict_auth_mock(),
        }
    }
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            users: Arc::new(self.users),
            identity: Arc::new(self.identity),
            products: Arc::new(self.products),
            rentals: Arc::new(self.rentals),
            auth: Arc::new(self.auth),
        })
    }

    /// Serve `route` with the caller already authenticated as `caller`,
    /// or anonymously when `None`.
    pub(crate) fn service(self, caller: Option<UserRecord>, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(InjectCaller(caller))
                .push(route),
        )
        .catcher(crate::errors::catcher())
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Mocks {
        auth,
        ..Mocks::default()
    }
    .into_state()
}

pub(crate) fn products_service(
    products: MockProductsService,
    caller: Option<UserRecord>,
    route: Router,
) -> Service {
    Mocks {
        products,
        ..Mocks::default()
    }
    .service(caller, route)
}

pub(crate) fn rentals_service(
    rentals: MockRentalsService,
    caller: UserRecord,
    route: Router,
) -> Service {
    Mocks {
        rentals,
        ..Mocks::default()
    }
    .service(Some(caller), route)
}

pub(crate) fn identity_service(
    identity: MockIdentityService,
    caller: UserRecord,
    route: Router,
) -> Service {
    Mocks {
        identity,
        ..Mocks::default()
    }
    .service(Some(caller), route)
}

struct InjectCaller(Option<UserRecord>);

#[salvo::handler]
impl InjectCaller {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        if let Some(caller) = &self.0 {
            depot.insert_current_user(caller.clone());
        }

        ctrl.call_next(req, depot, res).await;
    }
}
