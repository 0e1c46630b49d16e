mod requests;
mod responses;

use std::collections::HashMap;

use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use diesel::prelude::*;
use diesel::MysqlConnection;

use crate::{
    database::{assert, get_db_conn, last_insert_id},
    models::{
        appointments::{Appointment, APPOINT_STATUS_COMPLETED},
        case_histories::{CaseHistory, Medicine, NewCaseHistory, NewMedicine, NewReport, Report},
        doctors::Doctor,
        users::{User, ROLE_ADMIN, ROLE_DOCTOR, ROLE_STAFF},
    },
    protocol::{ListParams, SimpleResponse},
    query,
    session::{require_role, SessionClaims},
    utils::format_datetime,
    DbPool,
};

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(all_doctors)
        .service(all_case_history)
        .service(case_history)
        .service(create_case_history)
        .service(update_case_history)
        .service(delete_case_history);
}

crate::list_funcs! {
    (all_doctors, "/all", DoctorListResponse),
    (all_case_history, "/allCaseHistory", CaseHistoryListResponse),
}

crate::auth_post_funcs! {
    (create_case_history, "/createCaseHistory", CreateCaseHistoryRequest, SimpleResponse),
}

crate::id_funcs! {
    (get, case_history, "/caseHistory/{id}", CaseHistoryResponse),
    (delete, delete_case_history, "/deleteCaseHistory/{id}", SimpleResponse),
}

crate::id_body_funcs! {
    (put, update_case_history, "/updateCaseHistory/{id}", UpdateCaseHistoryRequest, SimpleResponse),
}

async fn all_doctors_impl(
    pool: web::Data<DbPool>,
    _claims: SessionClaims,
    params: ListParams,
) -> anyhow::Result<DoctorListResponse> {
    use crate::schema::{doctors, users};

    let conn = get_db_conn(&pool)?;
    let items = web::block(move || {
        doctors::table
            .inner_join(users::table.on(doctors::uid.eq(users::uid)))
            .load::<(Doctor, User)>(&conn)
    })
    .await
    .context("DB error")?;

    let items = items
        .into_iter()
        .map(|(doctor, user)| DoctorItem {
            did: doctor.did,
            name: user.name,
            email: user.email,
            department: doctor.department,
            title: doctor.title,
            information: doctor.information,
        })
        .collect();

    Ok(DoctorListResponse {
        success: true,
        err: "".to_string(),
        doctors: query::apply(items, &params),
    })
}

async fn all_case_history_impl(
    pool: web::Data<DbPool>,
    _claims: SessionClaims,
    params: ListParams,
) -> anyhow::Result<CaseHistoryListResponse> {
    use crate::schema::{case_histories, doctors, patients, users};

    let conn = get_db_conn(&pool)?;
    let items = web::block(move || -> anyhow::Result<Vec<CaseHistoryItem>> {
        let histories = case_histories::table
            .load::<CaseHistory>(&conn)
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

        Ok(histories
            .into_iter()
            .map(|history| CaseHistoryItem {
                cid: history.cid,
                aid: history.aid,
                patient_name: patient_names.get(&history.pid).cloned().unwrap_or_default(),
                doctor_name: doctor_names.get(&history.did).cloned().unwrap_or_default(),
                notes: history.notes,
                created_at: format_datetime(&history.created_at),
                created_on: history.created_at.date(),
            })
            .collect())
    })
    .await?;

    Ok(CaseHistoryListResponse {
        success: true,
        err: "".to_string(),
        case_histories: query::apply(items, &params),
    })
}

async fn case_history_impl(
    pool: web::Data<DbPool>,
    _claims: SessionClaims,
    cid: u64,
) -> anyhow::Result<CaseHistoryResponse> {
    use crate::schema::{case_histories, doctors, medicines, patients, reports, users};

    assert::assert_case_history(&pool, cid).await?;

    let conn = get_db_conn(&pool)?;
    let response = web::block(move || -> anyhow::Result<CaseHistoryResponse> {
        let history = case_histories::table
            .filter(case_histories::cid.eq(cid))
            .get_result::<CaseHistory>(&conn)
            .context("DB error")?;

        let doctor_uid = doctors::table
            .filter(doctors::did.eq(history.did))
            .select(doctors::uid)
            .get_result::<u64>(&conn)
            .optional()
            .context("DB error")?;
        let patient_uid = patients::table
            .filter(patients::pid.eq(history.pid))
            .select(patients::uid)
            .get_result::<u64>(&conn)
            .optional()
            .context("DB error")?;
        let name_of = |uid: Option<u64>| -> anyhow::Result<String> {
            match uid {
                Some(uid) => users::table
                    .filter(users::uid.eq(uid))
                    .select(users::name)
                    .get_result::<String>(&conn)
                    .optional()
                    .context("DB error")
                    .map(Option::unwrap_or_default),
                None => Ok("".to_string()),
            }
        };

        let meds = medicines::table
            .filter(medicines::cid.eq(cid))
            .load::<Medicine>(&conn)
            .context("DB error")?;
        let reps = reports::table
            .filter(reports::cid.eq(cid))
            .load::<Report>(&conn)
            .context("DB error")?;

        Ok(CaseHistoryResponse {
            success: true,
            err: "".to_string(),
            cid: history.cid,
            aid: history.aid,
            patient_name: name_of(patient_uid)?,
            doctor_name: name_of(doctor_uid)?,
            notes: history.notes,
            created_at: format_datetime(&history.created_at),
            medicines: meds
                .into_iter()
                .map(|m| MedicineItem {
                    name: m.name,
                    dosage: m.dosage,
                    frequency: m.frequency,
                    duration: m.duration,
                })
                .collect(),
            reports: reps
                .into_iter()
                .map(|r| ReportItem {
                    report_type: r.report_type,
                    file_url: r.file_url,
                    description: r.description,
                })
                .collect(),
        })
    })
    .await?;

    Ok(response)
}

fn insert_children(
    conn: &MysqlConnection,
    cid: u64,
    meds: Vec<MedicineInput>,
    reps: Vec<ReportInput>,
) -> anyhow::Result<()> {
    use crate::schema::{medicines, reports};

    let meds: Vec<NewMedicine> = meds
        .into_iter()
        .map(|m| NewMedicine {
            cid,
            name: m.name,
            dosage: m.dosage,
            frequency: m.frequency,
            duration: m.duration,
        })
        .collect();
    if !meds.is_empty() {
        diesel::insert_into(medicines::table)
            .values(meds)
            .execute(conn)
            .context("DB error")?;
    }

    let reps: Vec<NewReport> = reps
        .into_iter()
        .map(|r| NewReport {
            cid,
            report_type: r.report_type,
            file_url: r.file_url,
            description: r.description,
        })
        .collect();
    if !reps.is_empty() {
        diesel::insert_into(reports::table)
            .values(reps)
            .execute(conn)
            .context("DB error")?;
    }

    Ok(())
}

async fn create_case_history_impl(
    pool: web::Data<DbPool>,
    claims: SessionClaims,
    info: web::Json<CreateCaseHistoryRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::{appointments, case_histories};

    require_role(&claims, &[ROLE_DOCTOR])?;
    let info = info.into_inner();
    assert::assert_appointment(&pool, info.aid).await?;

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            let appo = appointments::table
                .filter(appointments::aid.eq(info.aid))
                .get_result::<Appointment>(&conn)
                .context("DB error")?;
            if appo.status != APPOINT_STATUS_COMPLETED {
                bail!("Appointment is not completed");
            }

            let dup = case_histories::table
                .filter(case_histories::aid.eq(info.aid))
                .count()
                .get_result::<i64>(&conn)
                .context("DB error")?;
            if dup > 0 {
                bail!("Case history already exists for this appointment");
            }

            let data = NewCaseHistory {
                aid: info.aid,
                did: appo.did,
                pid: appo.pid,
                notes: info.notes,
                created_at: None,
            };
            diesel::insert_into(case_histories::table)
                .values(data)
                .execute(&conn)
                .context("DB error")?;
            let cid = diesel::select(last_insert_id)
                .get_result::<u64>(&conn)
                .context("DB error")?;

            insert_children(&conn, cid, info.medicines, info.reports)
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn update_case_history_impl(
    pool: web::Data<DbPool>,
    claims: SessionClaims,
    cid: u64,
    info: web::Json<UpdateCaseHistoryRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::{case_histories, medicines, reports};

    require_role(&claims, &[ROLE_DOCTOR])?;
    assert::assert_case_history(&pool, cid).await?;

    let info = info.into_inner();
    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            diesel::update(case_histories::table.filter(case_histories::cid.eq(cid)))
                .set(case_histories::notes.eq(&info.notes))
                .execute(&conn)
                .context("DB error")?;

            diesel::delete(medicines::table.filter(medicines::cid.eq(cid)))
                .execute(&conn)
                .context("DB error")?;
            diesel::delete(reports::table.filter(reports::cid.eq(cid)))
                .execute(&conn)
                .context("DB error")?;

            insert_children(&conn, cid, info.medicines, info.reports)
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn delete_case_history_impl(
    pool: web::Data<DbPool>,
    claims: SessionClaims,
    cid: u64,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::{case_histories, medicines, reports};

    require_role(&claims, &[ROLE_DOCTOR, ROLE_ADMIN, ROLE_STAFF])?;
    assert::assert_case_history(&pool, cid).await?;

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction::<_, anyhow::Error, _>(|| {
            diesel::delete(medicines::table.filter(medicines::cid.eq(cid)))
                .execute(&conn)
                .context("DB error")?;
            diesel::delete(reports::table.filter(reports::cid.eq(cid)))
                .execute(&conn)
                .context("DB error")?;
            diesel::delete(case_histories::table.filter(case_histories::cid.eq(cid)))
                .execute(&conn)
                .context("DB error")?;
            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}
