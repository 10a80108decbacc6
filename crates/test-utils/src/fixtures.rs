//! Canonical header lines used by the synthetic file builder and tests.

/// Epicenter `(lon, lat)` written on [`LOC_LINE`].
pub const EPICENTER: (f64, f64) = (-76.6, -13.39);

/// Epicentral depth (km) written on [`LOC_LINE`].
pub const EPICENTER_DEPTH: f64 = 39.0;

pub const BANNER_LINE: &str =
    "% ---------------------------------- FINITE-SOURCE RUPTURE MODEL --------------------------------";

/// Event line with a bracketed aside, an 8-digit date and a source tag.
pub const EVENT_LINE: &str =
    "% Event : NEAR COAST OF PERU [2007-08-15] 20070815 [Synthetic]  (s2007PISCOP01TEST)";

/// Location expected after parsing [`EVENT_LINE`].
pub const EVENT_LOCATION: &str = "NEAR COAST OF PERU";

pub const LOC_LINE: &str = "% Loc  : LAT = -13.39    LON = -76.6    DEP = 39.0";

pub const RUPT_LINE: &str = "% Rupt : HypX = 90 km  Hypz = 60 km  avTr = 6.6 s  avVr = 1.5 km/s";

pub const SVF_LINE: &str = "% SVF  : Boxcar  (type of slip-velocity function used)";

pub const COLUMN_HEADER: &str = "% ---------------------------------------------------------------------------------------\n%     LAT        LON       X==EW      Y==NS      Z       SLIP       RAKE      TRUP      RISE      SF_MOMENT\n% ---------------------------------------------------------------------------------------";
