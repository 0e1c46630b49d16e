mod requests;
mod responses;

use actix_web::{delete, get, put, web, HttpResponse, Responder};
use anyhow::{bail, Context};
use diesel::prelude::*;

use crate::{
    database::{assert, get_db_conn},
    models::appointments::APPOINT_STATUS_CANCELLED,
    models::users::{UpdateUser, User, ROLE_ADMIN, ROLE_DOCTOR, ROLE_PATIENT, ROLE_STAFF},
    nav,
    protocol::{ListParams, SimpleResponse},
    query,
    session::{require_role, SessionClaims},
    utils::format_datetime,
    DbPool,
};

use self::{requests::*, responses::*};

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(all_users)
        .service(update_user)
        .service(delete_user)
        .service(top_cards)
        .service(nav_entries);
}

crate::list_funcs! {
    (all_users, "/users", UserListResponse),
}

crate::id_body_funcs! {
    (put, update_user, "/users/{id}", UpdateUserRequest, SimpleResponse),
}

crate::id_funcs! {
    (delete, delete_user, "/users/{id}", SimpleResponse),
}

crate::auth_get_funcs! {
    (top_cards, "/TopCards", TopCardsResponse),
    (nav_entries, "/nav", NavResponse),
}

async fn all_users_impl(
    pool: web::Data<DbPool>,
    claims: SessionClaims,
    params: ListParams,
) -> anyhow::Result<UserListResponse> {
    use crate::schema::users;

    require_role(&claims, &[ROLE_ADMIN, ROLE_STAFF])?;

    let conn = get_db_conn(&pool)?;
    let items = web::block(move || users::table.load::<User>(&conn))
        .await
        .context("DB error")?;

    let items = items
        .into_iter()
        .map(|user| UserItem {
            uid: user.uid,
            name: user.name,
            email: user.email,
            role: user.role,
            telephone: user.telephone,
            created_at: format_datetime(&user.created_at),
        })
        .collect();

    Ok(UserListResponse {
        success: true,
        err: "".to_string(),
        users: query::apply(items, &params),
    })
}

async fn update_user_impl(
    pool: web::Data<DbPool>,
    claims: SessionClaims,
    uid: u64,
    info: web::Json<UpdateUserRequest>,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::users;

    require_role(&claims, &[ROLE_ADMIN, ROLE_STAFF])?;
    assert::assert_user(&pool, uid).await?;

    let info = info.into_inner();
    if let Some(role) = info.role.as_deref() {
        match role {
            ROLE_ADMIN | ROLE_DOCTOR | ROLE_PATIENT | ROLE_STAFF => {}
            _ => bail!("Unknown role"),
        }
    }
    let data = UpdateUser {
        name: info.name,
        telephone: info.telephone,
        role: info.role,
    };
    if data.name.is_none() && data.telephone.is_none() && data.role.is_none() {
        bail!("Nothing to update");
    }

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        diesel::update(users::table.filter(users::uid.eq(uid)))
            .set(&data)
            .execute(&conn)
    })
    .await
    .context("DB error")?;

    Ok(SimpleResponse::ok())
}

async fn delete_user_impl(
    pool: web::Data<DbPool>,
    claims: SessionClaims,
    uid: u64,
) -> anyhow::Result<SimpleResponse> {
    use crate::schema::{appointments, doctors, password_tokens, patients, users};

    require_role(&claims, &[ROLE_ADMIN, ROLE_STAFF])?;
    assert::assert_user(&pool, uid).await?;
    if claims.sub == uid {
        bail!("Cannot delete the signed-in account");
    }

    let conn = get_db_conn(&pool)?;
    web::block(move || {
        conn.transaction(|| {
            let did = doctors::table
                .filter(doctors::uid.eq(uid))
                .select(doctors::did)
                .get_result::<u64>(&conn)
                .optional()
                .context("DB error")?;
            let pid = patients::table
                .filter(patients::uid.eq(uid))
                .select(patients::pid)
                .get_result::<u64>(&conn)
                .optional()
                .context("DB error")?;

            let mut open = 0i64;
            if let Some(did) = did {
                open += appointments::table
                    .filter(appointments::did.eq(did))
                    .filter(appointments::status.ne(APPOINT_STATUS_CANCELLED))
                    .count()
                    .get_result::<i64>(&conn)
                    .context("DB error")?;
            }
            if let Some(pid) = pid {
                open += appointments::table
                    .filter(appointments::pid.eq(pid))
                    .filter(appointments::status.ne(APPOINT_STATUS_CANCELLED))
                    .count()
                    .get_result::<i64>(&conn)
                    .context("DB error")?;
            }
            if open > 0 {
                bail!("User still has booked appointments");
            }

            diesel::delete(doctors::table.filter(doctors::uid.eq(uid)))
                .execute(&conn)
                .context("DB error")?;
            diesel::delete(patients::table.filter(patients::uid.eq(uid)))
                .execute(&conn)
                .context("DB error")?;
            diesel::delete(password_tokens::table.filter(password_tokens::uid.eq(uid)))
                .execute(&conn)
                .context("DB error")?;
            diesel::delete(users::table.filter(users::uid.eq(uid)))
                .execute(&conn)
                .context("DB error")?;

            Ok(())
        })
    })
    .await?;

    Ok(SimpleResponse::ok())
}

async fn top_cards_impl(
    pool: web::Data<DbPool>,
    _claims: SessionClaims,
) -> anyhow::Result<TopCardsResponse> {
    use crate::schema::{appointments, doctors, patients, rooms};

    let conn = get_db_conn(&pool)?;
    let (doctors, patients, appointments, rooms) =
        web::block(move || -> anyhow::Result<(i64, i64, i64, i64)> {
            let doctors = doctors::table
                .count()
                .get_result::<i64>(&conn)
                .context("DB error")?;
            let patients = patients::table
                .count()
                .get_result::<i64>(&conn)
                .context("DB error")?;
            let appointments = appointments::table
                .count()
                .get_result::<i64>(&conn)
                .context("DB error")?;
            let rooms = rooms::table
                .count()
                .get_result::<i64>(&conn)
                .context("DB error")?;
            Ok((doctors, patients, appointments, rooms))
        })
        .await?;

    Ok(TopCardsResponse {
        success: true,
        err: "".to_string(),
        doctors,
        patients,
        appointments,
        rooms,
    })
}

async fn nav_entries_impl(
    _pool: web::Data<DbPool>,
    claims: SessionClaims,
) -> anyhow::Result<NavResponse> {
    Ok(NavResponse {
        success: true,
        err: "".to_string(),
        entries: nav::build_nav(&claims.role),
    })
}
