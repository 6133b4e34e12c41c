//! App Router

use salvo::Router;

use crate::{
    admin, auth, healthcheck, identity, observability::metrics_handler, products, rentals,
};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(identity_router())
                .push(vendor_router())
                .push(rentals_router())
                .push(admin_router()),
        )
}

fn identity_router() -> Router {
    Router::new()
        .push(
            Router::with_path("users/kyc")
                .get(identity::kyc_status::handler)
                .post(identity::submit_kyc::handler),
        )
        .push(
            Router::with_path("vendor/verification")
                .get(identity::verification_status::handler)
                .post(identity::submit_verification::handler),
        )
}

fn vendor_router() -> Router {
    Router::with_path("vendor/products")
        .get(products::vendor_index::handler)
        .post(products::create::handler)
        .push(
            Router::with_path("{product}")
                .put(products::update::handler)
                .delete(products::delete::handler),
        )
}

fn rentals_router() -> Router {
    Router::with_path("rentals")
        .post(rentals::create::handler)
        .push(Router::with_path("me").get(rentals::mine::handler))
        .push(Router::with_path("vendor").get(rentals::vendor::handler))
        .push(Router::with_path("admin/disputes").get(rentals::disputes::handler))
        .push(
            Router::with_path("{rental}")
                .push(Router::with_path("confirm").post(rentals::confirm::handler))
                .push(Router::with_path("return-request").post(rentals::return_request::handler))
                .push(Router::with_path("handover").patch(rentals::handover::handler))
                .push(Router::with_path("return/approve").patch(rentals::approve::handler))
                .push(Router::with_path("return/reject").patch(rentals::reject::handler)),
        )
}

fn admin_router() -> Router {
    Router::with_path("admin")
        .push(Router::with_path("stats").get(admin::stats::handler))
        .push(Router::with_path("vendors/pending").get(admin::pending_vendors::handler))
        .push(Router::with_path("users/{user}/kyc").patch(admin::kyc::handler))
        .push(
            Router::with_path("vendors/{user}/verification").patch(admin::verification::handler),
        )
}
