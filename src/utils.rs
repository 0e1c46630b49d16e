// Handler macro families. Every route is a thin wrapper around a
// hand-written `*_impl` returning `anyhow::Result<Response>`; errors
// become the `{success: false, err}` envelope. The wrappers expect the
// calling module to have `web`, `HttpResponse`, `Responder`, `DbPool`,
// `SessionClaims` and `ListParams` in scope.

/// Public POST endpoints with a JSON body (auth flows).
#[macro_export]
macro_rules! post_funcs {
    ( $( ( $func_name:ident, $url:expr, $request:ty, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[post($url)]
                async fn $func_name(
                    pool: web::Data<DbPool>,
                    keys: web::Data<crate::session::Keys>,
                    info: web::Json<$request>,
                ) -> impl Responder {
                    let response = match [<$func_name _impl>](pool, keys, info).await {
                        Ok(response) => response,
                        Err(err) => $response::err(err.to_string()),
                    };
                    HttpResponse::Ok().json(response)
                }
            }
        )+
    };
}

/// Public POST endpoints keyed by a path token (password reset/set).
#[macro_export]
macro_rules! token_post_funcs {
    ( $( ( $func_name:ident, $url:expr, $request:ty, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[post($url)]
                async fn $func_name(
                    pool: web::Data<DbPool>,
                    path: web::Path<String>,
                    info: web::Json<$request>,
                ) -> impl Responder {
                    let response = match [<$func_name _impl>](pool, path.into_inner(), info).await {
                        Ok(response) => response,
                        Err(err) => $response::err(err.to_string()),
                    };
                    HttpResponse::Ok().json(response)
                }
            }
        )+
    };
}

/// Authenticated POST endpoints with a JSON body.
#[macro_export]
macro_rules! auth_post_funcs {
    ( $( ( $func_name:ident, $url:expr, $request:ty, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[post($url)]
                async fn $func_name(
                    pool: web::Data<DbPool>,
                    claims: SessionClaims,
                    info: web::Json<$request>,
                ) -> impl Responder {
                    let response = match [<$func_name _impl>](pool, claims, info).await {
                        Ok(response) => response,
                        Err(err) => $response::err(err.to_string()),
                    };
                    HttpResponse::Ok().json(response)
                }
            }
        )+
    };
}

/// Authenticated GET list endpoints taking the shared filter/sort params.
#[macro_export]
macro_rules! list_funcs {
    ( $( ( $func_name:ident, $url:expr, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[get($url)]
                async fn $func_name(
                    pool: web::Data<DbPool>,
                    claims: SessionClaims,
                    params: web::Query<ListParams>,
                ) -> impl Responder {
                    let response = match [<$func_name _impl>](pool, claims, params.into_inner()).await {
                        Ok(response) => response,
                        Err(err) => $response::err(err.to_string()),
                    };
                    HttpResponse::Ok().json(response)
                }
            }
        )+
    };
}

/// Authenticated GET endpoints without parameters.
#[macro_export]
macro_rules! auth_get_funcs {
    ( $( ( $func_name:ident, $url:expr, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[get($url)]
                async fn $func_name(
                    pool: web::Data<DbPool>,
                    claims: SessionClaims,
                ) -> impl Responder {
                    let response = match [<$func_name _impl>](pool, claims).await {
                        Ok(response) => response,
                        Err(err) => $response::err(err.to_string()),
                    };
                    HttpResponse::Ok().json(response)
                }
            }
        )+
    };
}

/// Authenticated endpoints addressing one record by id, no body.
#[macro_export]
macro_rules! id_funcs {
    ( $( ( $method:ident, $func_name:ident, $url:expr, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[$method($url)]
                async fn $func_name(
                    pool: web::Data<DbPool>,
                    claims: SessionClaims,
                    path: web::Path<u64>,
                ) -> impl Responder {
                    let response = match [<$func_name _impl>](pool, claims, path.into_inner()).await {
                        Ok(response) => response,
                        Err(err) => $response::err(err.to_string()),
                    };
                    HttpResponse::Ok().json(response)
                }
            }
        )+
    };
}

/// Authenticated endpoints addressing one record by id with a JSON body.
#[macro_export]
macro_rules! id_body_funcs {
    ( $( ( $method:ident, $func_name:ident, $url:expr, $request:ty, $response:ty ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[$method($url)]
                async fn $func_name(
                    pool: web::Data<DbPool>,
                    claims: SessionClaims,
                    path: web::Path<u64>,
                    info: web::Json<$request>,
                ) -> impl Responder {
                    let response = match [<$func_name _impl>](pool, claims, path.into_inner(), info).await {
                        Ok(response) => response,
                        Err(err) => $response::err(err.to_string()),
                    };
                    HttpResponse::Ok().json(response)
                }
            }
        )+
    };
}

use anyhow::Context;
use chrono::{NaiveDateTime, NaiveTime};

pub fn clinic_open() -> NaiveTime {
    NaiveTime::from_hms(10, 0, 0)
}

pub fn clinic_close() -> NaiveTime {
    NaiveTime::from_hms(20, 0, 0)
}

pub fn parse_hhmm(s: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").context("Time must be HH:MM")
}

pub fn within_clinic_window(start: NaiveTime, end: NaiveTime) -> bool {
    clinic_open() <= start && start < end && end <= clinic_close()
}

/// Clinic-hours check on raw form input. Unparsable input is invalid,
/// matching the inline-validation contract of the booking form.
pub fn validate_clinic_window(start: &str, end: &str) -> bool {
    match (parse_hhmm(start), parse_hhmm(end)) {
        (Ok(start), Ok(end)) => within_clinic_window(start, end),
        _ => false,
    }
}

pub fn format_hhmm(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// 12-hour display format used for suggested slots.
pub fn to_12h(t: NaiveTime) -> String {
    t.format("%I:%M %p").to_string()
}

/// Back from 12-hour display to 24-hour form format.
pub fn to_24h(s: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%I:%M %p").context("Time must be hh:mm AM/PM")
}

pub fn format_datetime(t: &NaiveDateTime) -> String {
    t.format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clinic_window_boundaries() {
        assert!(!validate_clinic_window("09:59", "11:00"));
        assert!(validate_clinic_window("10:00", "20:00"));
        assert!(!validate_clinic_window("14:00", "13:00"));
        assert!(!validate_clinic_window("14:00", "14:00"));
        assert!(!validate_clinic_window("19:00", "20:01"));
        assert!(validate_clinic_window("10:00", "10:30"));
    }

    #[test]
    fn clinic_window_rejects_garbage() {
        assert!(!validate_clinic_window("", "11:00"));
        assert!(!validate_clinic_window("ten", "eleven"));
        assert!(!validate_clinic_window("25:00", "26:00"));
    }

    #[test]
    fn twelve_hour_round_trip() {
        let t = NaiveTime::from_hms(14, 30, 0);
        assert_eq!(to_12h(t), "02:30 PM");
        assert_eq!(to_24h("02:30 PM").unwrap(), t);

        let t = NaiveTime::from_hms(10, 0, 0);
        assert_eq!(to_12h(t), "10:00 AM");
        assert_eq!(to_24h(&to_12h(t)).unwrap(), t);
    }

    #[test]
    fn hhmm_parse_and_format() {
        assert_eq!(format_hhmm(parse_hhmm("16:45").unwrap()), "16:45");
        assert!(parse_hhmm("16:45:00").is_err());
    }
}
