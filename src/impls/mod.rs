mod download_processors;
