use actix_web::web;
use anyhow::{bail, Context};
use diesel::prelude::*;

use crate::{database::get_db_conn, DbPool};

pub async fn assert_user(pool: &web::Data<DbPool>, uid: u64) -> anyhow::Result<()> {
    use crate::schema::users;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        users::table
            .filter(users::uid.eq(uid))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("DB error")?;

    if res == 0 {
        bail!("No such user");
    }

    Ok(())
}

pub async fn assert_doctor(pool: &web::Data<DbPool>, did: u64) -> anyhow::Result<()> {
    use crate::schema::doctors;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        doctors::table
            .filter(doctors::did.eq(did))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("DB error")?;

    if res == 0 {
        bail!("No such doctor");
    }

    Ok(())
}

pub async fn assert_patient(pool: &web::Data<DbPool>, pid: u64) -> anyhow::Result<()> {
    use crate::schema::patients;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        patients::table
            .filter(patients::pid.eq(pid))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("DB error")?;

    if res == 0 {
        bail!("No such patient");
    }

    Ok(())
}

pub async fn assert_room(pool: &web::Data<DbPool>, rid: u64) -> anyhow::Result<()> {
    use crate::schema::rooms;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        rooms::table
            .filter(rooms::rid.eq(rid))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("DB error")?;

    if res == 0 {
        bail!("No such room");
    }

    Ok(())
}

pub async fn assert_appointment(pool: &web::Data<DbPool>, aid: u64) -> anyhow::Result<()> {
    use crate::schema::appointments;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        appointments::table
            .filter(appointments::aid.eq(aid))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("DB error")?;

    if res == 0 {
        bail!("No such appointment");
    }

    Ok(())
}

pub async fn assert_case_history(pool: &web::Data<DbPool>, cid: u64) -> anyhow::Result<()> {
    use crate::schema::case_histories;

    let conn = get_db_conn(pool)?;
    let res = web::block(move || {
        case_histories::table
            .filter(case_histories::cid.eq(cid))
            .count()
            .get_result::<i64>(&conn)
    })
    .await
    .context("DB error")?;

    if res == 0 {
        bail!("No such case history");
    }

    Ok(())
}
