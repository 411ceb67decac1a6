use crate::cors::{Cors, Decision};
use crate::exchange::{CorsRequest, CorsResponse};

/// Something that turns a request into a response
///
/// Implemented for every `Fn(&Req) -> Res`.
pub trait Handler<Req: ?Sized> {
    type Response;

    fn call(&self, req: &Req) -> Self::Response;
}

impl<Req: ?Sized, Res, F> Handler<Req> for F
where
    F: Fn(&Req) -> Res,
{
    type Response = Res;

    fn call(&self, req: &Req) -> Res {
        self(req)
    }
}

/// An inner handler wrapped with CORS handling
///
/// `OPTIONS` requests never reach the inner handler: they get a fresh
/// response with status `200` and, if the preflight passes, the grant
/// headers. Every other request runs the inner handler and gets the grant
/// headers added to its response.
#[derive(Debug, Clone)]
pub struct CorsService<H> {
    cors: Cors,
    inner: H,
}

impl<H> CorsService<H> {
    pub fn new(cors: Cors, inner: H) -> Self {
        Self { cors, inner }
    }

    /// Handle a request, returning the response and the CORS outcome.
    pub fn call_with_decision<Req>(&self, req: &Req) -> (H::Response, Decision)
    where
        Req: CorsRequest + ?Sized,
        H: Handler<Req>,
        H::Response: CorsResponse + Default,
    {
        if Cors::is_preflight(req) {
            let mut res = H::Response::default();
            let decision = self.cors.handle_preflight(req, &mut res);
            res.set_status(200);
            return (res, decision);
        }
        let mut res = self.inner.call(req);
        let decision = self.cors.handle_actual(req, &mut res);
        (res, decision)
    }
}

impl<Req, H> Handler<Req> for CorsService<H>
where
    Req: CorsRequest + ?Sized,
    H: Handler<Req>,
    H::Response: CorsResponse + Default,
{
    type Response = H::Response;

    fn call(&self, req: &Req) -> H::Response {
        self.call_with_decision(req).0
    }
}

impl Cors {
    /// Wrap `inner` so every request passes through this policy first.
    pub fn wrap<H>(&self, inner: H) -> CorsService<H> {
        CorsService::new(self.clone(), inner)
    }
}
