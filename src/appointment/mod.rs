mod requests;
mod responses;
pub mod utils;

use std::collections::HashMap;

use actix_web::{get, post, put, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use chrono::NaiveTime;
use diesel::prelude::*;

use crate::{
    database::{assert, get_db_conn},
    models::appointments::{
        Appointment, NewAppointment, APPOINT_STATUS_BOOKED, APPOINT_STATUS_CANCELLED,
        APPOINT_STATUS_COMPLETED,
    },
    models::users::{ROLE_ADMIN, ROLE_DOCTOR, ROLE_STAFF},
    protocol::{ListParams, SimpleResponse},
    query,
    session::{require_role, SessionClaims},
    utils::{format_hhmm, to_12h},
    DbPool,
};

use self::{
    requests::*,
    responses::*,
    utils::{has_conflict, suggest_slots, validate_booking, MAX_SUGGESTED_SLOTS},
};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(all_appointment)
        .service(doctor_appointment)
        .service(patient_appointment)
        .service(create_appointment)
        .service(cancel_appointment)
        .service(complete_appointment);
}

crate::list_funcs! {
    (all_appointment, "/allAppointment", AppointmentListResponse),
}

crate::auth_post_funcs! {
    (create_appointment, "/create", CreateAppointmentRequest, CreateAppointmentResponse),
}

crate::id_funcs! {
    (get, doctor_appointment, "/doctorAppointment/{id}", AppointmentListResponse),
    (get, patient_appointment, "/patientAppointment/{id}", AppointmentListResponse),
    (put, cancel_appointment, "/cancel/{id}", SimpleResponse),
    (put, complete_appointment, "/complete/{id}", SimpleResponse),
}

enum Scope {
    All,
    Doctor(u64),
    Patient(u64),
}

async fn fetch_items(
    pool: &web::Data<DbPool>,
    scope: Scope,
) -> anyhow::Result<Vec<AppointmentItem>> {
    use crate::schema::{appointments, doctors, patients, rooms, users};

    let conn = get_db_conn(pool)?;
    let items = web::block(move || -> anyhow::Result<Vec<AppointmentItem>> {
        let appos = match scope {
            Scope::All => appointments::table.load::<Appointment>(&conn),
            Scope::Doctor(did) => appointments::table
                .filter(appointments::did.eq(did))
                .load::<Appointment>(&conn),
            Scope::Patient(pid) => appointments::table
                .filter(appointments::pid.eq(pid))
                .load::<Appointment>(&conn),
        }
        .context("DB error")?;

        let user_names: HashMap<u64, String> = users::table
            .select((users::uid, users::name))
            .load::<(u64, String)>(&conn)
            .context("DB error")?
            .into_iter()
            .collect();
        let doctor_names: HashMap<u64, String> = doctors::table
            .select((doctors::did, doctors::uid))
            .load::<(u64, u64)>(&conn)
            .context("DB error")?
            .into_iter()
            .map(|(did, uid)| (did, user_names.get(&uid).cloned().unwrap_or_default()))
            .collect();
        let patient_names: HashMap<u64, String> = patients::table
            .select((patients::pid, patients::uid))
            .load::<(u64, u64)>(&conn)
            .context("DB error")?
            .into_iter()
            .map(|(pid, uid)| (pid, user_names.get(&uid).cloned().unwrap_or_default()))
            .collect();
        let room_names: HashMap<u64, String> = rooms::table
            .select((rooms::rid, rooms::room_name))
            .load::<(u64, String)>(&conn)
            .context("DB error")?
            .into_iter()
            .collect();

        Ok(appos
            .into_iter()
            .map(|appo| AppointmentItem {
                aid: appo.aid,
                patient_name: patient_names.get(&appo.pid).cloned().unwrap_or_default(),
                doctor_name: doctor_names.get(&appo.did).cloned().unwrap_or_default(),
                room_name: room_names.get(&appo.rid).cloned().unwrap_or_default(),
                appointment_date: appo.appointment_date,
                start_at: format_hhmm(appo.start_at),
                end_at: format_hhmm(appo.end_at),
                reason: appo.reason,
                status: appo.status,
            })
            .collect())
    })
    .await?;

    Ok(items)
}

async fn all_appointment_impl(
    pool: web::Data<DbPool>,
    _claims: SessionClaims,
    params: ListParams,
) -> anyhow::Result<AppointmentListResponse> {
    let items = fetch_items(&pool, Scope::All).await?;
    Ok(AppointmentListResponse {
        success: true,
        err: "".to_string(),
        appointments: query::apply(items, &params),
    })
}

async fn doctor_appointment_impl(
    pool: web::Data<DbPool>,
    _claims: SessionClaims,
    did: u64,
) -> anyhow::Result<AppointmentListResponse> {
    assert::assert_doctor(&pool, did).await?;
    let items = fetch_items(&pool, Scope::Doctor(did)).await?;
    Ok(AppointmentListResponse {
        success: true,
        err: "".to_string(),
        appointments: items,
    })
}

async fn patient_appointment_impl(
    pool: web::Data<DbPool>,
    _claims: SessionClaims,
    pid: u64,
) -> anyhow::Result<AppointmentListResponse> {
    assert::assert_patient(&pool, pid).await?;
    let items = fetch_items(&pool, Scope::Patient(pid)).await?;
    Ok(AppointmentListResponse {
        success: true,
        err: "".to_string(),
        appointments: items,
    })
}

async fn create_appointment_impl(
    pool: web::Data<DbPool>,
    claims: SessionClaims,
    info: web::Json<CreateAppointmentRequest>,
) -> anyhow::Result<CreateAppointmentResponse> {
    use crate::schema::appointments;

    let info = info.into_inner();

    // Validation never touches the database.
    let window = validate_booking(&info)?;

    assert::assert_patient(&pool, info.pid).await?;
    assert::assert_doctor(&pool, info.did).await?;
    assert::assert_room(&pool, info.rid).await?;

    let created_by = claims.sub;
    let conn = get_db_conn(&pool)?;
    let conflict = web::block(move || {
        conn.transaction::<_, anyhow::Error, _>(|| {
            // Same doctor or same room on the same day blocks the window.
            let day = appointments::table
                .filter(appointments::appointment_date.eq(window.date))
                .filter(appointments::status.ne(APPOINT_STATUS_CANCELLED))
                .filter(
                    appointments::did
                        .eq(info.did)
                        .or(appointments::rid.eq(info.rid)),
                )
                .load::<Appointment>(&conn)
                .context("DB error")?;

            let busy: Vec<(NaiveTime, NaiveTime)> =
                day.iter().map(|appo| (appo.start_at, appo.end_at)).collect();

            if has_conflict(&busy, window.start, window.end) {
                let duration = window.end.signed_duration_since(window.start);
                return Ok(Some(suggest_slots(&busy, duration, MAX_SUGGESTED_SLOTS)));
            }

            let data = NewAppointment {
                pid: info.pid,
                did: info.did,
                rid: info.rid,
                appointment_date: window.date,
                start_at: window.start,
                end_at: window.end,
                reason: info.reason,
                status: APPOINT_STATUS_BOOKED.to_string(),
                created_by,
                created_at: None,
            };
            diesel::insert_into(appointments::table)
                .values(data)
                .execute(&conn)
                .context("DB error")?;

            Ok(None)
        })
    })
    .await?;

    match conflict {
        Some(slots) => Ok(CreateAppointmentResponse::conflict(
            slots
                .into_iter()
                .map(|(start, end)| SlotItem {
                    start: to_12h(start),
                    end: to_12h(end),
                })
                .collect(),
        )),
        None => Ok(CreateAppointmentResponse::ok()),
    }
}

async fn cancel_appointment_impl(
    pool: web::Data<DbPool>,
    _claims: SessionClaims,
    aid: u64,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::appointments;

    assert::assert_appointment(&pool, aid).await?;

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            let appo = appointments::table
                .filter(appointments::aid.eq(aid))
                .get_result::<Appointment>(&conn)
                .context("DB error")?;
            match appo.status.as_str() {
                APPOINT_STATUS_COMPLETED => bail!("Appointment already completed"),
                APPOINT_STATUS_CANCELLED => bail!("Appointment already cancelled"),
                _ => {}
            }

            diesel::update(appointments::table.filter(appointments::aid.eq(aid)))
                .set(appointments::status.eq(APPOINT_STATUS_CANCELLED))
                .execute(&conn)
                .context("DB error")?;

            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn complete_appointment_impl(
    pool: web::Data<DbPool>,
    claims: SessionClaims,
    aid: u64,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::appointments;

    require_role(&claims, &[ROLE_DOCTOR, ROLE_ADMIN, ROLE_STAFF])?;
    assert::assert_appointment(&pool, aid).await?;

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            let appo = appointments::table
                .filter(appointments::aid.eq(aid))
                .get_result::<Appointment>(&conn)
                .context("DB error")?;
            match appo.status.as_str() {
                APPOINT_STATUS_COMPLETED => bail!("Appointment already completed"),
                APPOINT_STATUS_CANCELLED => bail!("Appointment already cancelled"),
                _ => {}
            }

            diesel::update(appointments::table.filter(appointments::aid.eq(aid)))
                .set(appointments::status.eq(APPOINT_STATUS_COMPLETED))
                .execute(&conn)
                .context("DB error")?;

            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}
