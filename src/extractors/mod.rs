pub mod validated_query;
