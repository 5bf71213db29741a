pub mod booking_dto;
pub mod oracle_dto;
pub mod road_dto;
