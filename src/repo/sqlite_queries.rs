/// Schema bootstrap; executed statement by statement.
pub const SCHEMA: &[&str] = &[
    r#"
CREATE TABLE IF NOT EXISTS profile (
    id TEXT PRIMARY KEY,
    phone TEXT NOT NULL UNIQUE,
    display_name TEXT,
    avatar_url TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#,
    r#"
CREATE TABLE IF NOT EXISTS pet (
    id TEXT PRIMARY KEY,
    owner_id TEXT NOT NULL,
    name TEXT NOT NULL,
    species TEXT NOT NULL,
    breed TEXT,
    gender TEXT,
    birth_date TEXT,
    weight REAL,
    color TEXT,
    photo_url TEXT,
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#,
    r#"
CREATE TABLE IF NOT EXISTS provider (
    id TEXT PRIMARY KEY,
    business_name TEXT NOT NULL,
    business_type TEXT NOT NULL,
    description TEXT,
    address TEXT NOT NULL,
    district TEXT NOT NULL,
    province TEXT NOT NULL,
    phone TEXT NOT NULL,
    email TEXT,
    website TEXT,
    logo_url TEXT,
    photos TEXT NOT NULL,
    rating REAL NOT NULL,
    review_count INTEGER NOT NULL,
    opening_hours TEXT NOT NULL,
    is_verified INTEGER NOT NULL,
    created_at TEXT NOT NULL
);
"#,
    r#"
CREATE TABLE IF NOT EXISTS service (
    id TEXT PRIMARY KEY,
    provider_id TEXT NOT NULL,
    name TEXT NOT NULL,
    description TEXT,
    duration_minutes INTEGER NOT NULL,
    price_min TEXT NOT NULL,
    price_max TEXT NOT NULL,
    pet_types TEXT NOT NULL,
    is_available INTEGER NOT NULL,
    created_at TEXT NOT NULL
);
"#,
    r#"
CREATE TABLE IF NOT EXISTS booking (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    pet_id TEXT NOT NULL,
    provider_id TEXT NOT NULL,
    service_id TEXT NOT NULL,
    booking_date TEXT NOT NULL,
    booking_time TEXT NOT NULL,
    status TEXT NOT NULL,
    notes TEXT,
    total_price TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#,
    "CREATE INDEX IF NOT EXISTS idx_pet_owner ON pet(owner_id);",
    "CREATE INDEX IF NOT EXISTS idx_booking_user ON booking(user_id);",
    "CREATE INDEX IF NOT EXISTS idx_booking_slot ON booking(provider_id,booking_date,booking_time);",
    "CREATE INDEX IF NOT EXISTS idx_service_provider ON service(provider_id);",
];

pub const QUERY_GET_PROFILE: &str = r#"
SELECT
    id,phone,display_name,avatar_url,created_at,updated_at
FROM profile
WHERE id=$1;
"#;

pub const QUERY_INSERT_PROFILE: &str = r#"
INSERT INTO profile(
    id,phone,display_name,avatar_url,created_at,updated_at
) VALUES($1,$2,$3,$4,$5,$6);
"#;

pub const QUERY_UPDATE_PROFILE: &str = r#"
UPDATE profile
SET display_name=$2,avatar_url=$3,updated_at=$4
WHERE id=$1;
"#;

pub const QUERY_GET_ALL_PETS: &str = r#"
SELECT
    id,owner_id,name,species,breed,gender,birth_date,weight,color,photo_url,notes,
    created_at,updated_at
FROM pet
WHERE owner_id=$1
ORDER BY created_at ASC;
"#;

pub const QUERY_GET_PET_BY_ID: &str = r#"
SELECT
    id,owner_id,name,species,breed,gender,birth_date,weight,color,photo_url,notes,
    created_at,updated_at
FROM pet
WHERE id=$1 AND owner_id=$2;
"#;

pub const QUERY_GET_PET_ANY_OWNER: &str = r#"
SELECT
    id,owner_id,name,species,breed,gender,birth_date,weight,color,photo_url,notes,
    created_at,updated_at
FROM pet
WHERE id=$1;
"#;

pub const QUERY_INSERT_PET: &str = r#"
INSERT INTO pet(
    id,owner_id,name,species,breed,gender,birth_date,weight,color,photo_url,notes,
    created_at,updated_at
) VALUES($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13);
"#;

pub const QUERY_UPDATE_PET: &str = r#"
UPDATE pet
SET name=$3,species=$4,breed=$5,gender=$6,birth_date=$7,weight=$8,color=$9,
    photo_url=$10,notes=$11,updated_at=$12
WHERE id=$1 AND owner_id=$2;
"#;

pub const QUERY_DELETE_PET: &str = r#"
DELETE FROM pet WHERE id=$1 AND owner_id=$2;
"#;

pub const QUERY_GET_BOOKINGS_BY_USER: &str = r#"
SELECT
    id,user_id,pet_id,provider_id,service_id,booking_date,booking_time,status,notes,
    total_price,created_at,updated_at
FROM booking
WHERE user_id=$1
ORDER BY booking_date ASC,booking_time ASC;
"#;

pub const QUERY_GET_BOOKING_BY_ID: &str = r#"
SELECT
    id,user_id,pet_id,provider_id,service_id,booking_date,booking_time,status,notes,
    total_price,created_at,updated_at
FROM booking
WHERE id=$1 AND user_id=$2;
"#;

pub const QUERY_INSERT_BOOKING: &str = r#"
INSERT INTO booking(
    id,user_id,pet_id,provider_id,service_id,booking_date,booking_time,status,notes,
    total_price,created_at,updated_at
) VALUES($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12);
"#;

pub const QUERY_UPDATE_BOOKING_STATUS: &str = r#"
UPDATE booking
SET status=$3,updated_at=$4
WHERE id=$1 AND user_id=$2;
"#;

pub const QUERY_COUNT_ACTIVE_BOOKINGS_FOR_SLOT: &str = r#"
SELECT COUNT(*)
FROM booking
WHERE
    provider_id=$1 AND
    booking_date=$2 AND
    booking_time=$3 AND
    status NOT IN ('completed','cancelled');
"#;

pub const QUERY_GET_ALL_PROVIDERS: &str = r#"
SELECT
    id,business_name,business_type,description,address,district,province,phone,email,
    website,logo_url,photos,rating,review_count,opening_hours,is_verified,created_at
FROM provider;
"#;

pub const QUERY_GET_PROVIDER_BY_ID: &str = r#"
SELECT
    id,business_name,business_type,description,address,district,province,phone,email,
    website,logo_url,photos,rating,review_count,opening_hours,is_verified,created_at
FROM provider
WHERE id=$1;
"#;

pub const QUERY_GET_SERVICES_BY_PROVIDER: &str = r#"
SELECT
    id,provider_id,name,description,duration_minutes,price_min,price_max,pet_types,
    is_available,created_at
FROM service
WHERE provider_id=$1
ORDER BY created_at ASC;
"#;

pub const QUERY_GET_SERVICE_BY_ID: &str = r#"
SELECT
    id,provider_id,name,description,duration_minutes,price_min,price_max,pet_types,
    is_available,created_at
FROM service
WHERE id=$1;
"#;

pub const QUERY_UPSERT_PROVIDER: &str = r#"
INSERT OR REPLACE INTO provider(
    id,business_name,business_type,description,address,district,province,phone,email,
    website,logo_url,photos,rating,review_count,opening_hours,is_verified,created_at
) VALUES($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16,$17);
"#;

pub const QUERY_UPSERT_SERVICE: &str = r#"
INSERT OR REPLACE INTO service(
    id,provider_id,name,description,duration_minutes,price_min,price_max,pet_types,
    is_available,created_at
) VALUES($1,$2,$3,$4,$5,$6,$7,$8,$9,$10);
"#;
