table! {
    appointments (aid) {
        aid -> Unsigned<Bigint>,
        pid -> Unsigned<Bigint>,
        did -> Unsigned<Bigint>,
        rid -> Unsigned<Bigint>,
        appointment_date -> Date,
        start_at -> Time,
        end_at -> Time,
        reason -> Varchar,
        status -> Char,
        created_by -> Unsigned<Bigint>,
        created_at -> Datetime,
    }
}

table! {
    case_histories (cid) {
        cid -> Unsigned<Bigint>,
        aid -> Unsigned<Bigint>,
        did -> Unsigned<Bigint>,
        pid -> Unsigned<Bigint>,
        notes -> Varchar,
        created_at -> Datetime,
    }
}

table! {
    doctors (did) {
        did -> Unsigned<Bigint>,
        uid -> Unsigned<Bigint>,
        department -> Varchar,
        title -> Varchar,
        information -> Varchar,
    }
}

table! {
    medicines (mid) {
        mid -> Unsigned<Bigint>,
        cid -> Unsigned<Bigint>,
        name -> Varchar,
        dosage -> Varchar,
        frequency -> Varchar,
        duration -> Varchar,
    }
}

table! {
    password_tokens (token) {
        token -> Char,
        uid -> Unsigned<Bigint>,
        purpose -> Char,
        created_at -> Datetime,
    }
}

table! {
    patients (pid) {
        pid -> Unsigned<Bigint>,
        uid -> Unsigned<Bigint>,
        gender -> Char,
        birthday -> Nullable<Date>,
    }
}

table! {
    reports (report_id) {
        report_id -> Unsigned<Bigint>,
        cid -> Unsigned<Bigint>,
        report_type -> Varchar,
        file_url -> Varchar,
        description -> Varchar,
    }
}

table! {
    rooms (rid) {
        rid -> Unsigned<Bigint>,
        room_name -> Varchar,
        room_type -> Varchar,
        capacity -> Integer,
        is_available -> Bool,
    }
}

table! {
    users (uid) {
        uid -> Unsigned<Bigint>,
        name -> Varchar,
        email -> Varchar,
        password -> Char,
        role -> Char,
        telephone -> Varchar,
        created_at -> Datetime,
    }
}

allow_tables_to_appear_in_same_query!(
    appointments,
    case_histories,
    doctors,
    medicines,
    password_tokens,
    patients,
    reports,
    rooms,
    users,
);
